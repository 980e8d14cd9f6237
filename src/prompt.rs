use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

/// Operator I/O used by the console, a scripted implementation lives in `simulation`
pub trait Prompt {
    /// Reads one answer, an empty answer yields `default` when given
    fn input(&mut self, query: &str, default: Option<&str>) -> eyre::Result<String>;

    fn confirm(&mut self, query: &str) -> eyre::Result<bool>;

    /// Numbered menu selection, `None` when the operator cancels
    fn select(&mut self, query: &str, items: &[&str]) -> eyre::Result<Option<usize>>;

    fn notify(&mut self, message: &str);
}

pub struct DialoguerPrompt {
    theme: ColorfulTheme,
}

impl Default for DialoguerPrompt {
    fn default() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompt for DialoguerPrompt {
    fn input(&mut self, query: &str, default: Option<&str>) -> eyre::Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(query);
        if let Some(default) = default {
            input = input.default(default.to_string()).show_default(false);
        }
        Ok(input.interact_text()?)
    }

    fn confirm(&mut self, query: &str) -> eyre::Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(query)
            .interact()?)
    }

    fn select(&mut self, query: &str, items: &[&str]) -> eyre::Result<Option<usize>> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(format!("{query} (esc to cancel)"))
            .items(items)
            .default(0)
            .interact_opt()?)
    }

    fn notify(&mut self, message: &str) {
        println!("{message}");
    }
}

pub fn ask_for<P: Prompt + ?Sized>(
    prompt: &mut P,
    query: &str,
    default: Option<&str>,
) -> eyre::Result<String> {
    let question = match default {
        Some(default) => format!("Enter {query} (default: {default}):"),
        None => format!("Enter {query}:"),
    };
    loop {
        let answer = prompt.input(&question, default)?;
        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
        if let Some(default) = default {
            return Ok(default.to_string());
        }
    }
}

pub fn print_invalid_input<P: Prompt + ?Sized>(prompt: &mut P, input_type: &str) {
    prompt.notify(&format!(
        "The {input_type} you entered is invalid. Please try again."
    ));
}

pub fn ask_for_number<P: Prompt + ?Sized>(
    prompt: &mut P,
    usage: &str,
    default: Option<&str>,
) -> eyre::Result<u128> {
    loop {
        match ask_for(prompt, usage, default)?.parse::<u128>() {
            Ok(number) => return Ok(number),
            Err(_) => print_invalid_input(prompt, "number"),
        }
    }
}

pub fn is_address(value: &str) -> bool {
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(body) => body.len() == 40 && hex::decode(body).is_ok(),
        None => false,
    }
}

pub fn ask_for_address<P: Prompt + ?Sized>(
    prompt: &mut P,
    usage: &str,
    default: Option<&str>,
) -> eyre::Result<String> {
    loop {
        let address = ask_for(prompt, &format!("the address {usage}"), default)?;
        if is_address(&address) {
            return Ok(address);
        }
        print_invalid_input(prompt, "address");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::ScriptedPrompt;

    #[test]
    fn test_number_reprompts_until_valid() {
        let mut prompt = ScriptedPrompt::new(["abc", "-3", "42"]);
        assert_eq!(ask_for_number(&mut prompt, "count", None).unwrap(), 42);
        assert_eq!(
            prompt.output(),
            vec![
                "The number you entered is invalid. Please try again.",
                "The number you entered is invalid. Please try again.",
            ]
        );
        assert_eq!(prompt.questions()[0], "Enter count:");
    }

    #[test]
    fn test_empty_answer_takes_default() {
        let mut prompt = ScriptedPrompt::new([""]);
        assert_eq!(ask_for_number(&mut prompt, "gasLimit", Some("0")).unwrap(), 0);
        assert_eq!(prompt.questions()[0], "Enter gasLimit (default: 0):");
    }

    #[test]
    fn test_address_validation() {
        assert!(is_address("0x5FbDB2315678afecb367f032d93F642f64180aa3"));
        assert!(!is_address("5FbDB2315678afecb367f032d93F642f64180aa3"));
        assert!(!is_address("0x5FbDB2315678afecb367f032d93F642f64180aa"));
        assert!(!is_address("0xZZbDB2315678afecb367f032d93F642f64180aa3"));

        let mut prompt =
            ScriptedPrompt::new(["0x12", "0x5FbDB2315678afecb367f032d93F642f64180aa3"]);
        let address = ask_for_address(&mut prompt, "of the Counter contract", None).unwrap();
        assert_eq!(address, "0x5FbDB2315678afecb367f032d93F642f64180aa3");
        assert_eq!(prompt.questions()[0], "Enter the address of the Counter contract:");
        assert_eq!(prompt.output().len(), 1);
    }
}
