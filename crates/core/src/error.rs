//! Error taxonomy for talking to the expert-system API.

/// Failures surfaced by catalog loads, diagnosis and backward chaining.
///
/// `Transport` and `Malformed` mean no usable answer arrived. `Rejected` and `Status` mean the
/// server answered and refused, possibly with its own message.
#[derive(Debug, thiserror::Error)]
pub enum ExpertError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("server returned HTTP {status}")]
    Status { status: u16, message: Option<String> },
    #[error("server reported failure")]
    Rejected { message: Option<String> },
    #[error("no symptoms selected")]
    EmptySelection,
}

pub type ExpertResult<T> = std::result::Result<T, ExpertError>;

/// User actions that can fail, each with its own fallback text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    LoadSymptoms,
    LoadDiseases,
    Diagnose,
    Backward,
}

impl Operation {
    /// Text shown when the server answered but refused without a message.
    pub fn refused_fallback(self) -> &'static str {
        match self {
            Operation::LoadSymptoms => "Gagal memuat data gejala",
            Operation::LoadDiseases => "Gagal memuat data penyakit",
            Operation::Diagnose => "Terjadi kesalahan saat diagnosa",
            Operation::Backward => "Terjadi kesalahan saat analisis",
        }
    }

    /// Text shown when no usable answer arrived.
    pub fn failed_fallback(self) -> &'static str {
        match self {
            Operation::LoadSymptoms => "Gagal memuat data gejala",
            Operation::LoadDiseases => "Gagal memuat data penyakit",
            Operation::Diagnose => "Gagal melakukan diagnosa",
            Operation::Backward => "Gagal melakukan analisis",
        }
    }
}

impl ExpertError {
    /// The server-provided message, if the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ExpertError::Status { message, .. } | ExpertError::Rejected { message } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }

    /// Most specific message available for showing to the user after `op` failed.
    pub fn user_message(&self, op: Operation) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }
        match self {
            ExpertError::Status { .. } | ExpertError::Rejected { .. } => {
                op.refused_fallback().to_string()
            }
            ExpertError::InvalidInput(reason) => reason.clone(),
            _ => op.failed_fallback().to_string(),
        }
    }
}
