use tui_textarea::Input;

use super::Entry;
use super::TurnReport;

pub enum Event {
    BackendMessage(Entry),
    TurnPartial(String),
    TurnCompleted(TurnReport),
    TurnFailed(String),
    HistoryCleared(Vec<Entry>),
    ModelChanged(String),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardEsc(),
    KeyboardPaste(String),
    UIResize(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
