use retention_probe::Config;
use retention_probe::core::RECOVERY_WINDOW_DAYS;

fn redact(token: Option<&str>) -> &'static str {
    match token {
        Some(token) if !token.trim().is_empty() => "(set, redacted)",
        _ => "(not set)",
    }
}

pub fn render_status(config: &Config) -> String {
    let mut lines = vec![
        "◆ retention-probe status".to_string(),
        String::new(),
        format!("Version        {}", env!("CARGO_PKG_VERSION")),
        format!(
            "Config         {}",
            config
                .config_path
                .as_ref()
                .map_or_else(|| "(built-in defaults)".to_string(), |p| p.display().to_string())
        ),
        String::new(),
        format!("Directory      {}", config.directory.endpoint),
        format!("  token        {}", redact(config.directory.token.as_deref())),
        format!("Mailbox        {}", config.mailbox.endpoint),
        format!("  token        {}", redact(config.mailbox.token.as_deref())),
        format!("Storage token  {}", redact(config.storage.token.as_deref())),
        "Storage tenants (priority order)".to_string(),
    ];

    for (index, tenant) in config.storage.tenants.iter().enumerate() {
        lines.push(format!(
            "  {}. {}  {}  {}",
            index + 1,
            tenant.id,
            tenant.admin_endpoint,
            tenant.site_url_template
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Adapter timeout  {}s",
        config.reliability.adapter_timeout_secs
    ));
    lines.push(format!("Recovery window  {RECOVERY_WINDOW_DAYS} days"));
    lines.push(format!(
        "Report           {} -> {}",
        config.report.format,
        config.output_dir().display()
    ));

    lines.join("\n")
}
