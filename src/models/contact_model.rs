//! models/contact_model.rs
//! Formulario de contacto: datos crudos, datos validados y respuestas HTTP.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize};

/// Tipo de formulario enviado desde la web.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tipo {
    /// "canjea": propuesta de intercambio
    Canjea,
    /// "forma": quiere formar parte
    Forma,
}

impl Tipo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tipo::Canjea => "canjea",
            Tipo::Forma => "forma",
        }
    }
}

impl FromStr for Tipo {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "canjea" => Ok(Tipo::Canjea),
            "forma" => Ok(Tipo::Forma),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Tipo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Campos tal cual llegan (JSON, urlencoded o multipart), sin validar.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default, deserialize_with = "lenient_text")]
    pub tipo: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub mail: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub telefono: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub mensaje: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub empresa: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub ubicacion: Option<String>,
}

impl ContactForm {
    /// Asigna un campo de texto recibido por multipart.
    /// Devuelve `false` si el nombre no corresponde a ningún campo conocido.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "tipo" => &mut self.tipo,
            "nombre" => &mut self.nombre,
            "mail" => &mut self.mail,
            "telefono" => &mut self.telefono,
            "mensaje" => &mut self.mensaje,
            "empresa" => &mut self.empresa,
            "ubicacion" => &mut self.ubicacion,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

/// Acepta texto, números o booleanos (algunos formularios mandan el teléfono como número).
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(serde::de::Error::custom("expected a text value")),
    }
}

/// Imagen subida, guardada completa en memoria.
#[derive(Debug, Clone)]
pub struct UploadedPhoto {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Envío ya validado, listo para el compositor de emails.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub tipo: Tipo,
    pub nombre: String,
    pub mail: String,
    pub telefono: Option<String>,
    pub mensaje: String,
    pub empresa: Option<String>,
    pub ubicacion: Option<String>,
    pub fotos: Vec<UploadedPhoto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "fotosEnviadas")]
    pub fotos_enviadas: usize,
}
