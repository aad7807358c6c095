//! Shell completion scripts.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::StudyError;

const BIN_NAME: &str = "studyfocus";

/// Print the completion script for `shell`, or how to install it.
///
/// # Errors
///
/// Returns an error for an unknown shell name.
pub fn completions(shell: &str, install: bool) -> Result<String, StudyError> {
    let shell = shell_from_str(shell).ok_or_else(|| {
        StudyError::Parse(format!(
            "Unknown shell '{shell}' (expected bash, zsh, fish, powershell or elvish)"
        ))
    })?;

    if install {
        return Ok(install_instructions(shell));
    }

    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut Cli::command(), BIN_NAME, &mut buf);
    String::from_utf8(buf).map_err(|e| StudyError::Parse(format!("UTF-8 error: {e}")))
}

fn shell_from_str(s: &str) -> Option<Shell> {
    match s.to_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "powershell" | "ps" | "pwsh" => Some(Shell::PowerShell),
        "elvish" => Some(Shell::Elvish),
        _ => None,
    }
}

fn install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => "# Add to ~/.bashrc:\nsource <(studyfocus completions bash)\n".to_string(),
        Shell::Zsh => "# Save to your fpath, then run compinit:\n\
                       studyfocus completions zsh > ~/.zsh/completions/_studyfocus\n"
            .to_string(),
        Shell::Fish => "# Save to the fish completions directory:\n\
                        studyfocus completions fish > ~/.config/fish/completions/studyfocus.fish\n"
            .to_string(),
        Shell::PowerShell => "# Add to your PowerShell profile ($PROFILE):\n\
                              studyfocus completions powershell | Out-String | Invoke-Expression\n"
            .to_string(),
        _ => format!("# Redirect the script where {shell} loads completions from:\nstudyfocus completions {shell}\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_from_str() {
        assert_eq!(shell_from_str("bash"), Some(Shell::Bash));
        assert_eq!(shell_from_str("ZSH"), Some(Shell::Zsh));
        assert_eq!(shell_from_str("pwsh"), Some(Shell::PowerShell));
        assert_eq!(shell_from_str("tcsh"), None);
    }

    #[test]
    fn test_generate_bash_completions() {
        let script = completions("bash", false).unwrap();

        assert!(script.contains("studyfocus"));
        assert!(script.contains("complete"));
    }

    #[test]
    fn test_install_instructions() {
        let text = completions("fish", true).unwrap();

        assert!(text.contains("studyfocus.fish"));
    }

    #[test]
    fn test_unknown_shell() {
        assert!(matches!(
            completions("tcsh", false),
            Err(StudyError::Parse(_))
        ));
    }
}
