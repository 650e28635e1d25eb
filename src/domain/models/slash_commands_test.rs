use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    assert!(SlashCommand::parse("").is_none());
}

#[test]
fn it_parse_space_only() {
    assert!(SlashCommand::parse(" ").is_none());
}

#[test]
fn it_parse_single_slash() {
    assert!(SlashCommand::parse("/").is_none());
}

#[test]
fn it_parse_invalid_prefix() {
    assert!(SlashCommand::parse("!q").is_none());
}

#[test]
fn it_parse_plain_prompt() {
    assert!(SlashCommand::parse("What is /model for?").is_none());
}

#[test]
fn it_parse_valid_prefix() {
    let cmd = SlashCommand::parse("/q");
    assert!(cmd.is_some());
    assert_eq!(cmd.unwrap().command, "/q");
}

#[test]
fn it_is_quit() {
    assert!(SlashCommand::parse("/q").unwrap().is_quit());
    assert!(SlashCommand::parse("/quit").unwrap().is_quit());
    assert!(SlashCommand::parse("/exit").unwrap().is_quit());
}

#[test]
fn it_is_clear() {
    assert!(SlashCommand::parse("/cl").unwrap().is_clear());
    assert!(SlashCommand::parse("/clear").unwrap().is_clear());
}

#[test]
fn it_is_model_list() {
    assert!(SlashCommand::parse("/ml").unwrap().is_model_list());
    assert!(SlashCommand::parse("/models").unwrap().is_model_list());
}

#[test]
fn it_is_model_set() {
    let cmd = SlashCommand::parse("/model gpt-4o").unwrap();
    assert!(cmd.is_model_set());
    assert!(!cmd.is_model_list());
    assert_eq!(cmd.args, vec!["gpt-4o".to_string()]);
}

#[test]
fn it_is_prompt_set() {
    let cmd = SlashCommand::parse("/p Translator").unwrap();
    assert!(cmd.is_prompt_set());
    assert_eq!(cmd.text(), "Translator");
}

#[test]
fn it_is_prompt_list() {
    assert!(SlashCommand::parse("/pl").unwrap().is_prompt_list());
    assert!(SlashCommand::parse("/prompts").unwrap().is_prompt_list());
}

#[test]
fn it_keeps_system_prompt_text() {
    let cmd = SlashCommand::parse("/system You are  a pirate").unwrap();
    assert!(cmd.is_system_prompt());
    assert_eq!(cmd.text(), "You are  a pirate");
}

#[test]
fn it_keeps_free_text_as_typed() {
    let cmd = SlashCommand::parse("/draw   a fox\n  in   the snow  ").unwrap();
    assert!(cmd.is_draw());
    assert_eq!(cmd.text(), "a fox\n  in   the snow");
    assert_eq!(cmd.args, vec!["a", "fox", "in", "the", "snow"]);

    let cmd = SlashCommand::parse("/system\nBe brief.").unwrap();
    assert!(cmd.is_system_prompt());
    assert_eq!(cmd.text(), "Be brief.");

    assert_eq!(SlashCommand::parse("/help").unwrap().text(), "");
}

#[test]
fn it_is_param_commands() {
    assert!(SlashCommand::parse("/params").unwrap().is_params());
    let cmd = SlashCommand::parse("/set temperature 0.2").unwrap();
    assert!(cmd.is_param_set());
    assert_eq!(cmd.args, vec!["temperature".to_string(), "0.2".to_string()]);
}

#[test]
fn it_is_draw() {
    let cmd = SlashCommand::parse("/draw a cat on a skateboard").unwrap();
    assert!(cmd.is_draw());
    assert_eq!(cmd.text(), "a cat on a skateboard");
}

#[test]
fn it_is_transcribe() {
    let cmd = SlashCommand::parse("/t ./memo.wav").unwrap();
    assert!(cmd.is_transcribe());
    assert_eq!(cmd.text(), "./memo.wav");
}

#[test]
fn it_is_help() {
    assert!(SlashCommand::parse("/h").unwrap().is_help());
    assert!(SlashCommand::parse("/help").unwrap().is_help());
}
