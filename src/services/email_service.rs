//! services/email_service.rs
//! Composición del email de contacto: asunto, HTML con imágenes inline y texto plano.

use std::path::Path;

use anyhow::{Context, Result};
use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::models::{
    contact_model::{ContactSubmission, Tipo},
    email_model::{ComposedEmail, EmailAttachment},
};

/// Se usa el primero que exista dentro del directorio de assets.
pub const LOGO_CANDIDATES: [&str; 5] = [
    "logo.png",
    "logo.jpg",
    "logo.jpeg",
    "logo.webp",
    "logo.gif",
];

pub const LOGO_CID: &str = "logo@intercanjes";

/// Content-id de la foto `index` (base 1).
pub fn photo_cid(index: usize) -> String {
    format!("foto-{index}@intercanjes")
}

pub fn subject_for(tipo: Tipo) -> &'static str {
    match tipo {
        Tipo::Canjea => "Nuevo intercambio - CANJEA",
        Tipo::Forma => "Nuevo contacto - FORMÁ PARTE",
    }
}

/// Escapa texto de usuario para insertarlo en HTML.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn logo_content_type(filename: &str) -> &'static str {
    match filename.rsplit('.').next() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/png",
    }
}

/// Busca el logo en `assets_dir`. `Ok(None)` si ningún candidato existe.
pub async fn load_logo(assets_dir: &Path) -> Result<Option<EmailAttachment>> {
    for candidate in LOGO_CANDIDATES {
        let path = assets_dir.join(candidate);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            continue;
        }

        let data = tokio::fs::read(&path)
            .await
            .with_context(|| format!("No se pudo leer el logo {}", path.display()))?;

        return Ok(Some(EmailAttachment {
            filename: candidate.to_string(),
            content_type: logo_content_type(candidate).to_string(),
            data: Bytes::from(data),
            content_id: Some(LOGO_CID.to_string()),
        }));
    }
    Ok(None)
}

#[derive(Debug, Clone)]
pub struct EmailComposer {
    from: String,
    to: String,
    logo: Option<EmailAttachment>,
}

impl EmailComposer {
    pub fn new(from: String, to: String, logo: Option<EmailAttachment>) -> Self {
        Self { from, to, logo }
    }

    pub fn compose(&self, sub: &ContactSubmission, sent_at: DateTime<Utc>) -> ComposedEmail {
        let mut attachments = Vec::with_capacity(sub.fotos.len() + 1);
        if let Some(logo) = &self.logo {
            attachments.push(logo.clone());
        }
        for (i, foto) in sub.fotos.iter().enumerate() {
            attachments.push(EmailAttachment {
                filename: foto.filename.clone(),
                content_type: foto.content_type.clone(),
                data: foto.data.clone(),
                content_id: Some(photo_cid(i + 1)),
            });
        }

        let fecha = sent_at.format("%d/%m/%Y %H:%M UTC").to_string();

        ComposedEmail {
            from: self.from.clone(),
            to: self.to.clone(),
            reply_to: Some(sub.mail.clone()),
            subject: subject_for(sub.tipo).to_string(),
            html: self.render_html(sub, &fecha),
            text: render_text(sub, &fecha),
            attachments,
        }
    }

    fn render_html(&self, sub: &ContactSubmission, fecha: &str) -> String {
        let tipo = sub.tipo.as_str().to_uppercase();
        let mail = escape_html(&sub.mail);

        let logo = if self.logo.is_some() {
            format!(
                r#"<div style="text-align:center;margin-bottom:16px;"><img src="cid:{LOGO_CID}" alt="Intercanjes" style="max-width:180px;"></div>"#
            )
        } else {
            String::new()
        };

        let telefono = sub
            .telefono
            .as_deref()
            .map(escape_html)
            .unwrap_or_else(|| "No proporcionado".to_string());

        // empresa y ubicación solo aplican a "canjea"
        let mut extra = String::new();
        if sub.tipo == Tipo::Canjea {
            if let Some(empresa) = &sub.empresa {
                extra.push_str(&html_row("Empresa", &escape_html(empresa)));
            }
            if let Some(ubicacion) = &sub.ubicacion {
                extra.push_str(&html_row("Ubicación", &escape_html(ubicacion)));
            }
        }

        let galeria = if sub.fotos.is_empty() {
            String::new()
        } else {
            let imgs: String = sub
                .fotos
                .iter()
                .enumerate()
                .map(|(i, foto)| {
                    format!(
                        r#"<img src="cid:{}" alt="{}" style="max-width:260px;margin:6px;border-radius:6px;">"#,
                        photo_cid(i + 1),
                        escape_html(&foto.filename)
                    )
                })
                .collect();
            format!(
                r#"<hr><h3>Fotos adjuntas ({})</h3><div class="galeria">{}</div>"#,
                sub.fotos.len(),
                imgs
            )
        };

        let mensaje = escape_html(&sub.mensaje).replace("\r\n", "\n").replace('\n', "<br>");

        format!(
            r#"<!DOCTYPE html>
<html>
<body style="font-family:Arial,sans-serif;color:#333;">
{logo}
<h2>Nuevo mensaje de contacto - {tipo}</h2>
<table cellpadding="4">
{tipo_row}{nombre_row}<tr><td><strong>Email:</strong></td><td><a href="mailto:{mail}">{mail}</a></td></tr>
{telefono_row}{extra}</table>
<hr>
<p><strong>Mensaje:</strong></p>
<p>{mensaje}</p>
{galeria}
<hr>
<p><em>Enviado desde el formulario de contacto el {fecha}</em></p>
</body>
</html>
"#,
            tipo_row = html_row("Tipo de formulario", &tipo),
            nombre_row = html_row("Nombre", &escape_html(&sub.nombre)),
            telefono_row = html_row("Teléfono", &telefono),
        )
    }
}

fn html_row(label: &str, value: &str) -> String {
    format!("<tr><td><strong>{label}:</strong></td><td>{value}</td></tr>\n")
}

fn render_text(sub: &ContactSubmission, fecha: &str) -> String {
    let tipo = sub.tipo.as_str().to_uppercase();
    let mut out = format!("Nuevo mensaje de contacto - {tipo}\n\n");

    out.push_str(&format!("Tipo de formulario: {tipo}\n"));
    out.push_str(&format!("Nombre: {}\n", sub.nombre));
    out.push_str(&format!("Email: {}\n", sub.mail));
    out.push_str(&format!(
        "Teléfono: {}\n",
        sub.telefono.as_deref().unwrap_or("No proporcionado")
    ));
    if sub.tipo == Tipo::Canjea {
        if let Some(empresa) = &sub.empresa {
            out.push_str(&format!("Empresa: {empresa}\n"));
        }
        if let Some(ubicacion) = &sub.ubicacion {
            out.push_str(&format!("Ubicación: {ubicacion}\n"));
        }
    }

    out.push_str(&format!("\nMensaje:\n{}\n", sub.mensaje));

    if !sub.fotos.is_empty() {
        out.push_str(&format!("\nFotos adjuntas ({}):\n", sub.fotos.len()));
        for foto in &sub.fotos {
            out.push_str(&format!("- {}\n", foto.filename));
        }
    }

    out.push_str(&format!(
        "\n---\nEnviado desde el formulario de contacto el {fecha}\n"
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::contact_model::UploadedPhoto;
    use chrono::TimeZone;

    fn submission(tipo: Tipo, fotos: usize) -> ContactSubmission {
        ContactSubmission {
            tipo,
            nombre: "Ana <script>".into(),
            mail: "ana@example.com".into(),
            telefono: None,
            mensaje: "Linea 1\nLinea 2 & más".into(),
            empresa: Some("Acme".into()),
            ubicacion: Some("Rosario".into()),
            fotos: (0..fotos)
                .map(|i| UploadedPhoto {
                    filename: format!("foto{i}.png"),
                    content_type: "image/png".into(),
                    data: Bytes::from_static(b"\x89PNG"),
                })
                .collect(),
        }
    }

    fn composer(with_logo: bool) -> EmailComposer {
        let logo = with_logo.then(|| EmailAttachment {
            filename: "logo.png".into(),
            content_type: "image/png".into(),
            data: Bytes::from_static(b"logo"),
            content_id: Some(LOGO_CID.into()),
        });
        EmailComposer::new("from@example.com".into(), "to@example.com".into(), logo)
    }

    fn sent_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap()
    }

    #[test]
    fn escapes_html_specials() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("ñandú"), "ñandú");
    }

    #[test]
    fn subject_depends_on_tipo() {
        let c = composer(false);
        assert_eq!(
            c.compose(&submission(Tipo::Canjea, 0), sent_at()).subject,
            "Nuevo intercambio - CANJEA"
        );
        assert_eq!(
            c.compose(&submission(Tipo::Forma, 0), sent_at()).subject,
            "Nuevo contacto - FORMÁ PARTE"
        );
    }

    #[test]
    fn canjea_with_photos_embeds_gallery() {
        let email = composer(true).compose(&submission(Tipo::Canjea, 2), sent_at());

        assert!(email.html.contains("Fotos adjuntas (2)"));
        assert!(email.html.contains(r#"src="cid:foto-1@intercanjes""#));
        assert!(email.html.contains(r#"src="cid:foto-2@intercanjes""#));
        assert!(email.html.contains("cid:logo@intercanjes"));
        assert!(email.html.contains("Empresa:"));
        assert!(email.html.contains("Rosario"));

        // logo primero, luego las fotos en orden
        let cids: Vec<_> = email
            .attachments
            .iter()
            .map(|a| a.content_id.clone().unwrap())
            .collect();
        assert_eq!(
            cids,
            vec!["logo@intercanjes", "foto-1@intercanjes", "foto-2@intercanjes"]
        );
        assert_eq!(email.inline_attachments().count(), 3);

        assert!(email.text.contains("Fotos adjuntas (2):"));
        assert!(email.text.contains("- foto1.png"));
    }

    #[test]
    fn forma_hides_canjea_fields() {
        let email = composer(false).compose(&submission(Tipo::Forma, 0), sent_at());
        assert!(!email.html.contains("Empresa"));
        assert!(!email.html.contains("Ubicación"));
        assert!(!email.text.contains("Empresa"));
        assert!(!email.html.contains("Fotos adjuntas"));
        assert!(!email.html.contains("cid:"));
        assert!(email.attachments.is_empty());
    }

    #[test]
    fn user_text_is_escaped_and_newlines_kept() {
        let email = composer(false).compose(&submission(Tipo::Canjea, 0), sent_at());
        assert!(email.html.contains("Ana &lt;script&gt;"));
        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("Linea 1<br>Linea 2 &amp; más"));
        assert!(email.html.contains("No proporcionado"));
        // el texto plano no se escapa
        assert!(email.text.contains("Nombre: Ana <script>"));
    }

    #[test]
    fn addresses_and_footer() {
        let email = composer(false).compose(&submission(Tipo::Forma, 0), sent_at());
        assert_eq!(email.from, "from@example.com");
        assert_eq!(email.to, "to@example.com");
        assert_eq!(email.reply_to.as_deref(), Some("ana@example.com"));
        assert!(email.html.contains("05/03/2024 14:30 UTC"));
        assert!(email.text.contains("05/03/2024 14:30 UTC"));
    }

    #[actix_rt::test]
    async fn missing_logo_dir_yields_none() {
        let logo = load_logo(Path::new("./no-existe-este-directorio")).await.unwrap();
        assert!(logo.is_none());
    }

    #[actix_rt::test]
    async fn first_existing_logo_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("logo.webp"), b"webp").unwrap();
        std::fs::write(dir.path().join("logo.jpg"), b"jpg").unwrap();

        let logo = load_logo(dir.path()).await.unwrap().unwrap();
        assert_eq!(logo.filename, "logo.jpg");
        assert_eq!(logo.content_type, "image/jpeg");
        assert_eq!(logo.data, Bytes::from_static(b"jpg"));
        assert_eq!(logo.content_id.as_deref(), Some(LOGO_CID));
    }

    #[test]
    fn logo_type_from_extension() {
        assert_eq!(logo_content_type("logo.jpeg"), "image/jpeg");
        assert_eq!(logo_content_type("logo.png"), "image/png");
        assert_eq!(logo_content_type("logo.webp"), "image/webp");
    }
}
