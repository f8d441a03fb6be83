//! `iotpanel manpage`: roff output via clap_mangen.

use std::io::Write;

use clap::CommandFactory;

use crate::cli::Cli;
use crate::error::CliError;

/// Write the man page for `subcommand` (or the top-level command) to stdout.
pub fn render(subcommand: Option<&str>) -> Result<(), CliError> {
    let page = page_for(subcommand)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&page)?;
    stdout.flush()?;
    Ok(())
}

fn page_for(subcommand: Option<&str>) -> Result<Vec<u8>, CliError> {
    let root = Cli::command();
    let cmd = match subcommand {
        None => root,
        Some(name) => {
            let sub = root
                .find_subcommand(name)
                .filter(|sub| !sub.is_hide_set())
                .ok_or_else(|| CliError::Validation {
                    field: "command".into(),
                    reason: format!("no subcommand named '{name}'"),
                })?;
            let full_name = format!("{}-{}", root.get_name(), sub.get_name());
            sub.clone().name(full_name)
        }
    };

    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd).render(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_page_lists_subcommands() {
        let page = String::from_utf8(page_for(None).unwrap()).unwrap();
        assert!(page.contains(".TH"));
        assert!(page.contains("screenshot"));
    }

    #[test]
    fn subcommand_page_documents_its_own_commands() {
        let page = String::from_utf8(page_for(Some("screenshot")).unwrap()).unwrap();
        assert!(page.contains(".TH"));
        assert!(page.contains("upload"));
        assert!(page.contains("iotpanel"));
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(matches!(
            page_for(Some("bogus")),
            Err(CliError::Validation { .. })
        ));
    }
}
