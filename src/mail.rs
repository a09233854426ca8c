//! Email delivery of finished reports over SMTP.

use lettre::message::{header::ContentType, Attachment, Mailbox, Message, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{SmtpTransport, Transport};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::error::ReportError;
use crate::format::filename_date;
use crate::model::OrderAggregate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpTlsMode {
    Implicit,
    Starttls,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_user: String,
    #[serde(default)]
    pub smtp_password: String,
    pub smtp_from: String,
    #[serde(default)]
    pub smtp_tls_mode: Option<SmtpTlsMode>,
}

impl MailConfig {
    /// Port 465 means implicit TLS (SMTPS), everything else STARTTLS.
    fn tls_mode(&self) -> SmtpTlsMode {
        self.smtp_tls_mode.unwrap_or(if self.smtp_port == 465 {
            SmtpTlsMode::Implicit
        } else {
            SmtpTlsMode::Starttls
        })
    }
}

/// Attachment name for a rendered report: `handover-<orderId>-<dd-mm-yyyy>.pdf`.
pub fn report_filename(order_id: &str, generated_at: OffsetDateTime) -> String {
    sanitize_filename(&format!("handover-{}-{}.pdf", order_id, filename_date(generated_at)))
}

fn sanitize_filename(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.';
        out.push(if ok { ch } else { '_' });
    }
    let trimmed = out.trim_matches('_').to_string();
    if trimmed.is_empty() { "report.pdf".to_string() } else { trimmed }
}

pub fn build_smtp_transport(cfg: &MailConfig) -> Result<SmtpTransport, ReportError> {
    let host = cfg.smtp_host.trim();
    if host.is_empty() {
        return Err(ReportError::Mail("SMTP host is not configured".to_string()));
    }

    let mut builder = match cfg.tls_mode() {
        SmtpTlsMode::Implicit => {
            let tls_params = TlsParameters::new(host.to_string())
                .map_err(|e| ReportError::Mail(format!("TLS parameters: {e}")))?;
            SmtpTransport::builder_dangerous(host)
                .port(cfg.smtp_port)
                .tls(Tls::Wrapper(tls_params))
        }
        SmtpTlsMode::Starttls => SmtpTransport::starttls_relay(host)
            .map_err(|e| ReportError::Mail(format!("invalid SMTP host: {e}")))?
            .port(cfg.smtp_port),
    };

    if !cfg.smtp_user.trim().is_empty() {
        builder = builder.credentials(Credentials::new(
            cfg.smtp_user.clone(),
            cfg.smtp_password.clone(),
        ));
    }

    Ok(builder.build())
}

/// Send the rendered PDF to one recipient, plain text and HTML body
/// alternatives plus the attachment.
pub fn send_report_email(
    cfg: &MailConfig,
    order: &OrderAggregate,
    pdf_bytes: Vec<u8>,
    to: &str,
    generated_at: OffsetDateTime,
) -> Result<(), ReportError> {
    let from_mailbox: Mailbox = cfg
        .smtp_from
        .parse()
        .map_err(|_| ReportError::Mail("invalid From address in SMTP config".to_string()))?;
    let to_mailbox: Mailbox = to
        .parse()
        .map_err(|_| ReportError::Mail(format!("invalid recipient address: {to}")))?;

    let subject = format!("Übergabeprotokoll {}", order.order_number);
    let text_body = format!(
        "Guten Tag,\n\nanbei das Übergabeprotokoll zum Auftrag {}.\n\nMit freundlichen Grüßen",
        order.order_number
    );
    let html_body = format!(
        "<p>Guten Tag,</p><p>anbei das Übergabeprotokoll zum Auftrag <b>{}</b>.</p><p>Mit freundlichen Grüßen</p>",
        order.order_number
    );
    let alternative = MultiPart::alternative()
        .singlepart(SinglePart::plain(text_body))
        .singlepart(SinglePart::html(html_body));

    let content_type = ContentType::parse("application/pdf")
        .map_err(|e| ReportError::Mail(format!("attachment content type: {e}")))?;
    let attachment =
        Attachment::new(report_filename(&order.id, generated_at)).body(pdf_bytes, content_type);

    let email = Message::builder()
        .from(from_mailbox)
        .to(to_mailbox)
        .subject(subject)
        .multipart(MultiPart::mixed().multipart(alternative).singlepart(attachment))
        .map_err(|e| ReportError::Mail(format!("failed to build email: {e}")))?;

    let transport = build_smtp_transport(cfg)?;
    transport
        .send(&email)
        .map_err(|e| ReportError::Mail(format!("send failed: {e}")))?;
    log::info!("report for order {} sent to {to}", order.order_number);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::format_description::well_known::Rfc3339;

    #[test]
    fn report_filename_is_id_plus_date() {
        let at = OffsetDateTime::parse("2024-03-15T12:00:00Z", &Rfc3339).unwrap();
        assert_eq!(
            report_filename("a1b2c3", at),
            "handover-a1b2c3-15-03-2024.pdf"
        );
    }

    #[test]
    fn filename_replaces_unsafe_characters() {
        let at = OffsetDateTime::parse("2024-03-15T12:00:00Z", &Rfc3339).unwrap();
        let name = report_filename("weird/id äöü", at);
        assert!(!name.contains('/'));
        assert!(!name.contains(' '));
        assert!(name.ends_with(".pdf"));
    }

    #[test]
    fn port_465_defaults_to_implicit_tls() {
        let cfg = MailConfig {
            smtp_host: "mail.example.com".to_string(),
            smtp_port: 465,
            smtp_user: String::new(),
            smtp_password: String::new(),
            smtp_from: "noreply@example.com".to_string(),
            smtp_tls_mode: None,
        };
        assert_eq!(cfg.tls_mode(), SmtpTlsMode::Implicit);
        let cfg = MailConfig { smtp_port: 587, ..cfg };
        assert_eq!(cfg.tls_mode(), SmtpTlsMode::Starttls);
    }

    #[test]
    fn empty_host_is_rejected() {
        let cfg = MailConfig {
            smtp_host: "  ".to_string(),
            smtp_port: 587,
            smtp_user: String::new(),
            smtp_password: String::new(),
            smtp_from: "noreply@example.com".to_string(),
            smtp_tls_mode: None,
        };
        assert!(matches!(build_smtp_transport(&cfg), Err(ReportError::Mail(_))));
    }
}
