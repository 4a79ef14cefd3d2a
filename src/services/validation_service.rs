//! services/validation_service.rs
//! Valida el formulario crudo y lo convierte en un `ContactSubmission`.

use crate::models::{
    contact_model::{ContactForm, ContactSubmission, Tipo, UploadedPhoto},
    error_model::ContactError,
};

/// Texto con contenido real; blancos cuentan como ausentes.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn validate_submission(
    form: ContactForm,
    fotos: Vec<UploadedPhoto>,
) -> Result<ContactSubmission, ContactError> {
    let (tipo, nombre, mail, mensaje) = match (
        present(form.tipo),
        present(form.nombre),
        present(form.mail),
        present(form.mensaje),
    ) {
        (Some(t), Some(n), Some(m), Some(msg)) => (t, n, m, msg),
        _ => return Err(ContactError::MissingFields),
    };

    // coincidencia exacta: " canjea " no es un tipo válido
    let tipo: Tipo = tipo.parse().map_err(|_| ContactError::InvalidTipo)?;

    Ok(ContactSubmission {
        tipo,
        nombre: nombre.trim().to_string(),
        mail: mail.trim().to_string(),
        telefono: present(form.telefono).map(|t| t.trim().to_string()),
        mensaje,
        empresa: present(form.empresa).map(|e| e.trim().to_string()),
        ubicacion: present(form.ubicacion).map(|u| u.trim().to_string()),
        fotos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_form() -> ContactForm {
        ContactForm {
            tipo: Some("canjea".into()),
            nombre: Some("Ana".into()),
            mail: Some("ana@example.com".into()),
            telefono: Some("".into()),
            mensaje: Some("Hola\nque tal".into()),
            empresa: Some("  Acme  ".into()),
            ubicacion: None,
        }
    }

    #[test]
    fn accepts_complete_form() {
        let sub = validate_submission(full_form(), vec![]).unwrap();
        assert_eq!(sub.tipo, Tipo::Canjea);
        assert_eq!(sub.nombre, "Ana");
        assert_eq!(sub.mensaje, "Hola\nque tal");
        assert_eq!(sub.empresa.as_deref(), Some("Acme"));
        assert!(sub.telefono.is_none());
        assert!(sub.ubicacion.is_none());
    }

    #[test]
    fn missing_mail_is_rejected() {
        let mut form = full_form();
        form.mail = None;
        assert!(matches!(
            validate_submission(form, vec![]),
            Err(ContactError::MissingFields)
        ));
    }

    #[test]
    fn blank_required_field_is_missing() {
        let mut form = full_form();
        form.nombre = Some("   ".into());
        assert!(matches!(
            validate_submission(form, vec![]),
            Err(ContactError::MissingFields)
        ));
    }

    #[test]
    fn unknown_tipo_is_rejected() {
        let mut form = full_form();
        form.tipo = Some("other".into());
        assert!(matches!(
            validate_submission(form, vec![]),
            Err(ContactError::InvalidTipo)
        ));
    }

    #[test]
    fn padded_tipo_is_rejected() {
        for raw in [" canjea ", "forma\n", "Canjea"] {
            let mut form = full_form();
            form.tipo = Some(raw.into());
            assert!(
                matches!(validate_submission(form, vec![]), Err(ContactError::InvalidTipo)),
                "tipo {raw:?}"
            );
        }
    }

    #[test]
    fn missing_fields_win_over_bad_tipo() {
        let mut form = full_form();
        form.tipo = Some("other".into());
        form.mensaje = None;
        assert!(matches!(
            validate_submission(form, vec![]),
            Err(ContactError::MissingFields)
        ));
    }
}
