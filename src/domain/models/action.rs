pub enum Action {
    BackendAbort(),
    BackendRequest(String),
}
