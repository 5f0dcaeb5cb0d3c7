use penny_client::ClientError;

pub fn render_error(error: &ClientError) -> String {
    let heading = if error.is_internal() {
        "penny could not finish because of a problem on this machine."
    } else {
        "penny could not finish that command."
    };

    let mut lines = vec![
        heading.to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
        String::new(),
        "What to do next:".to_string(),
    ];

    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use penny_client::ClientError;

    use super::render_error;

    #[test]
    fn renders_standard_error_layout() {
        let error = ClientError::invalid_argument_for_command("bad step", Some("calc"));

        let rendered = render_error(&error);
        assert!(rendered.starts_with("penny could not finish that command."));
        assert!(rendered.contains("  Error:    invalid_argument"));
        assert!(rendered.contains("  Details:  bad step"));
        assert!(rendered.contains("What to do next:"));
        assert!(rendered.contains("  1. Run `penny calc --help` for usage."));
    }

    #[test]
    fn internal_errors_use_machine_heading_and_default_step() {
        let error = ClientError::new("internal_io", "disk went away", Vec::new());

        let rendered = render_error(&error);
        assert!(rendered.starts_with("penny could not finish because of a problem"));
        assert!(rendered.ends_with("  1. Retry the command."));
    }
}
