use anyhow::{Result, anyhow};
use console::{Key, Term, style};
use dialoguer::{Input, Password};

pub enum MenuChoice {
    Back,
    Quit,
    Index(usize),
}

// Help line for arrow-navigation mode; lists exactly the keys handled there.
const ARROW_HELP: &str = "Use arrows + Enter. 'b' = back, 'q' = quit.";

/// Numbered menu. The first key decides the input mode: arrow keys start
/// interactive navigation, anything else falls back to typed selection.
/// 'b' = back, 'q' = quit.
pub fn prompt_menu(
    prompt: &str,
    labels: &[String],
    default: Option<usize>,
    header: Option<&str>,
) -> Result<MenuChoice> {
    let term = Term::stdout();
    let _ = term.clear_screen();
    if let Some(h) = header {
        println!("{}", h);
    }
    println!("{}", prompt);
    for (i, it) in labels.iter().enumerate() {
        println!("{}: {}", i + 1, it);
    }
    println!("Type a number + Enter, or use arrow keys + Enter. 'b' = back, 'q' = quit.");

    let key = term.read_key()?;
    match key {
        Key::ArrowUp | Key::ArrowDown | Key::Home | Key::End | Key::PageUp | Key::PageDown => {
            arrow_select(prompt, labels, default, header)
        }
        Key::Char('q') | Key::Char('Q') => Ok(MenuChoice::Quit),
        Key::Char('b') | Key::Char('B') => Ok(MenuChoice::Back),
        Key::Enter => {
            if let Some(d) = default {
                return Ok(MenuChoice::Index(d));
            }
            Err(anyhow!("no selection"))
        }
        Key::Char(c) => {
            let mut builder = Input::new().with_prompt("Selection").allow_empty(true);
            if !c.is_control() {
                builder = builder.with_initial_text(c.to_string());
            }
            let input: String = builder.interact_text()?;
            parse_selection(&input, labels.len(), default)
        }
        _ => {
            let input: String = Input::new()
                .with_prompt("Selection")
                .allow_empty(true)
                .interact_text()?;
            parse_selection(&input, labels.len(), default)
        }
    }
}

/// Free-form line input for the login/signup/submit forms.
pub fn read_line(prompt: &str) -> Result<String> {
    let value: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(value.trim().to_string())
}

pub fn read_password(prompt: &str) -> Result<String> {
    let value = Password::new().with_prompt(prompt).interact()?;
    Ok(value)
}

/// Transient error line: shown in red, dismissed by any key.
pub fn flash_error(message: &str) {
    println!();
    println!("{}", style(message).red().bold());
    println!("Press any key to continue.");
    let _ = Term::stdout().read_key();
}

pub fn flash_notice(message: &str) {
    println!();
    println!("{}", style(message).green());
    println!("Press any key to continue.");
    let _ = Term::stdout().read_key();
}

fn parse_selection(input: &str, len: usize, default: Option<usize>) -> Result<MenuChoice> {
    let s = input.trim();
    if s.is_empty() {
        if let Some(d) = default {
            return Ok(MenuChoice::Index(d));
        }
        return Err(anyhow!("no selection"));
    }
    if s.eq_ignore_ascii_case("q") {
        return Ok(MenuChoice::Quit);
    }
    if s.eq_ignore_ascii_case("b") {
        return Ok(MenuChoice::Back);
    }
    let idx: usize = s
        .parse::<usize>()
        .map_err(|_| anyhow!("invalid selection"))?;
    if idx == 0 || idx > len {
        return Err(anyhow!("out of range"));
    }
    Ok(MenuChoice::Index(idx - 1))
}

fn arrow_select(
    prompt: &str,
    labels: &[String],
    default: Option<usize>,
    header: Option<&str>,
) -> Result<MenuChoice> {
    let term = Term::stdout();
    let mut sel = default.unwrap_or(0).min(labels.len().saturating_sub(1));
    let mut top: usize = 0;
    loop {
        term.clear_screen()?;
        if let Some(h) = header {
            println!("{}", h);
        }
        println!("{}", prompt);

        let (rows_u16, _cols_u16) = term.size();
        let rows: usize = rows_u16 as usize;
        let reserved: usize = 2 + if header.is_some() { 1 } else { 0 };
        let mut max_visible: usize = rows.saturating_sub(reserved);
        if max_visible < 3 {
            max_visible = 3;
        }
        if max_visible > labels.len() {
            max_visible = labels.len();
        }

        // keep selection in viewport
        if sel < top {
            top = sel;
        }
        let end = top + max_visible;
        if sel >= end {
            top = sel + 1 - max_visible;
        }

        let end = (top + max_visible).min(labels.len());
        for i in top..end {
            if i == sel {
                println!("> {}: {}", i + 1, labels[i]);
            } else {
                println!("  {}: {}", i + 1, labels[i]);
            }
        }
        println!("{ARROW_HELP}");

        match term.read_key()? {
            Key::ArrowUp => {
                if sel > 0 {
                    sel -= 1;
                }
            }
            Key::ArrowDown => {
                if sel + 1 < labels.len() {
                    sel += 1;
                }
            }
            Key::Home => {
                sel = 0;
            }
            Key::End => {
                if !labels.is_empty() {
                    sel = labels.len() - 1;
                }
            }
            Key::PageUp => {
                let step: usize = max_visible.saturating_sub(1).max(1);
                sel = sel.saturating_sub(step);
            }
            Key::PageDown => {
                let step: usize = max_visible.saturating_sub(1).max(1);
                sel = (sel + step).min(labels.len().saturating_sub(1));
            }
            Key::Enter => {
                return Ok(MenuChoice::Index(sel));
            }
            Key::Char('q') | Key::Char('Q') => {
                return Ok(MenuChoice::Quit);
            }
            Key::Char('b') | Key::Char('B') | Key::Escape => {
                return Ok(MenuChoice::Back);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_parses_one_based_numbers() {
        match parse_selection("2", 3, None).unwrap() {
            MenuChoice::Index(i) => assert_eq!(i, 1),
            _ => panic!("expected index"),
        }
        assert!(parse_selection("0", 3, None).is_err());
        assert!(parse_selection("4", 3, None).is_err());
        assert!(parse_selection("nope", 3, None).is_err());
    }

    #[test]
    fn selection_recognizes_back_and_quit() {
        assert!(matches!(
            parse_selection("b", 3, None).unwrap(),
            MenuChoice::Back
        ));
        assert!(matches!(
            parse_selection("Q", 3, None).unwrap(),
            MenuChoice::Quit
        ));
    }

    #[test]
    fn arrow_help_lists_only_supported_keys() {
        // No section-jump key in this app; the help must not advertise one.
        assert!(!ARROW_HELP.contains("Tab"));
        assert!(ARROW_HELP.contains("'b' = back"));
        assert!(ARROW_HELP.contains("'q' = quit"));
    }

    #[test]
    fn empty_selection_uses_the_default() {
        assert!(matches!(
            parse_selection("", 3, Some(0)).unwrap(),
            MenuChoice::Index(0)
        ));
        assert!(parse_selection("", 3, None).is_err());
    }
}
