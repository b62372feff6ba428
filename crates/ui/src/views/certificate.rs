use std::path::{Path, PathBuf};

use dioxus::prelude::*;
use services::{Certificate, CertificateError};

const CERTIFICATE_CSS: &str = "
body { margin: 0; background: #f4f1ea; font-family: Georgia, serif; color: #1f2a44; }
.certificate { width: 960px; margin: 40px auto; padding: 64px; background: #fffdf8;
  border: 12px double #b8922e; text-align: center; }
.certificate__brand { letter-spacing: 0.3em; text-transform: uppercase; font-size: 14px; color: #7a6a3a; }
.certificate__heading { font-size: 44px; margin: 24px 0 8px; }
.certificate__lead { font-size: 18px; color: #4b5568; }
.certificate__holder { font-size: 36px; margin: 24px 0; border-bottom: 1px solid #b8922e; display: inline-block; padding: 0 32px 8px; }
.certificate__course { font-size: 24px; font-weight: bold; margin: 16px 0 40px; }
.certificate__meta { display: flex; justify-content: space-between; font-size: 14px; color: #4b5568; }
";

#[component]
pub fn CertificateDocument(certificate: Certificate) -> Element {
    let holder = certificate.holder_name();
    rsx! {
        div { class: "certificate",
            p { class: "certificate__brand", "LearningPost Pro" }
            h1 { class: "certificate__heading", "Certificate of Completion" }
            p { class: "certificate__lead", "This certifies that" }
            h2 { class: "certificate__holder", "{holder}" }
            p { class: "certificate__lead", "has successfully completed" }
            p { class: "certificate__course", "{certificate.course_title}" }
            div { class: "certificate__meta",
                span { "Date: {certificate.issued_on}" }
                span { "Serial No: {certificate.serial_number}" }
            }
        }
    }
}

/// Standalone HTML page for a certificate.
#[must_use]
pub fn render_certificate_html(certificate: &Certificate) -> String {
    let title = format!("{} Certificate", certificate.course_title);
    let document = dioxus_ssr::render_element(rsx! {
        html { lang: "en",
            head {
                meta { charset: "utf-8" }
                title { "{title}" }
                style { "{CERTIFICATE_CSS}" }
            }
            body {
                CertificateDocument { certificate: certificate.clone() }
            }
        }
    });
    format!("<!DOCTYPE html>{document}")
}

/// Render and write the certificate into `dir`.
///
/// # Errors
///
/// Returns `CertificateError::Io` if the file cannot be written.
pub fn export_certificate(certificate: &Certificate, dir: &Path) -> Result<PathBuf, CertificateError> {
    certificate.save(dir, &render_certificate_html(certificate))
}
