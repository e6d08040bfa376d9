use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use parking_lot::Mutex;
use thiserror::Error;

use crate::ExportDocument;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("{channel} failed to deliver {filename}")]
    Io {
        channel: String,
        filename: String,
        #[source]
        source: io::Error,
    },
    #[error("{channel} rejected {filename}: {reason}")]
    Rejected {
        channel: String,
        filename: String,
        reason: String,
    },
    #[error("fallback delivery failed after primary delivery failed ({primary})")]
    FallbackFailed {
        primary: Box<DeliveryError>,
        #[source]
        fallback: Box<DeliveryError>,
    },
}

/// A place a finished document can be handed to, such as a file or the
/// clipboard.
pub trait Delivery: Send + Sync {
    fn deliver(
        &self,
        payload: &str,
        suggested_filename: &str,
        mime_type: &str,
    ) -> Result<(), DeliveryError>;
}

/// Which channel ended up carrying a document.
#[derive(Debug)]
pub enum DeliveryOutcome {
    Primary,
    Fallback { primary_error: DeliveryError },
}

/// Hands `document` to `primary`, and to `fallback` only if `primary` fails.
///
/// Each channel is invoked at most once and both receive the same payload.
pub fn deliver_with_fallback(
    document: &ExportDocument,
    primary: &dyn Delivery,
    fallback: &dyn Delivery,
) -> Result<DeliveryOutcome, DeliveryError> {
    let deliver = |channel: &dyn Delivery| {
        channel.deliver(
            document.payload(),
            document.suggested_filename(),
            document.mime_type(),
        )
    };

    match deliver(primary) {
        Ok(()) => Ok(DeliveryOutcome::Primary),
        Err(primary_error) => {
            log::warn!("{primary_error:#}, falling back to secondary delivery");
            match deliver(fallback) {
                Ok(()) => Ok(DeliveryOutcome::Fallback { primary_error }),
                Err(fallback_error) => Err(DeliveryError::FallbackFailed {
                    primary: Box::new(primary_error),
                    fallback: Box::new(fallback_error),
                }),
            }
        }
    }
}

/// Writes documents into a directory under their suggested file name.
#[derive(Debug, Clone)]
pub struct FileDelivery {
    directory: PathBuf,
}

impl FileDelivery {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl Delivery for FileDelivery {
    fn deliver(
        &self,
        payload: &str,
        suggested_filename: &str,
        _mime_type: &str,
    ) -> Result<(), DeliveryError> {
        let path = self.directory.join(suggested_filename);
        fs::write(&path, payload).map_err(|source| DeliveryError::Io {
            channel: "file delivery".into(),
            filename: path.display().to_string(),
            source,
        })?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}

/// Writes the raw payload to a stream, e.g. stdout.
pub struct WriterDelivery<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterDelivery<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Delivery for WriterDelivery<W> {
    fn deliver(
        &self,
        payload: &str,
        suggested_filename: &str,
        _mime_type: &str,
    ) -> Result<(), DeliveryError> {
        let mut writer = self.writer.lock();
        writer
            .write_all(payload.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|source| DeliveryError::Io {
                channel: "stream delivery".into(),
                filename: suggested_filename.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExportFormat, RampSpecRegistry, RegistryVariant, export, generate_variant_palette};
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct RecordingDelivery {
        fail: bool,
        calls: Mutex<Vec<(String, String, String)>>,
    }

    impl RecordingDelivery {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<(String, String, String)> {
            self.calls.lock().clone()
        }
    }

    impl Delivery for RecordingDelivery {
        fn deliver(
            &self,
            payload: &str,
            suggested_filename: &str,
            mime_type: &str,
        ) -> Result<(), DeliveryError> {
            self.calls.lock().push((
                payload.to_string(),
                suggested_filename.to_string(),
                mime_type.to_string(),
            ));
            if self.fail {
                Err(DeliveryError::Rejected {
                    channel: "recording".into(),
                    filename: suggested_filename.to_string(),
                    reason: "clipboard unavailable".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn figma_document() -> ExportDocument {
        let palette = generate_variant_palette(RampSpecRegistry::builtin(), RegistryVariant::Light);
        export(&palette, ExportFormat::FigmaStyles).unwrap()
    }

    #[test]
    fn test_primary_success_skips_fallback() {
        let document = figma_document();
        let (primary, fallback) = (RecordingDelivery::default(), RecordingDelivery::default());

        let outcome = deliver_with_fallback(&document, &primary, &fallback).unwrap();
        assert!(matches!(outcome, DeliveryOutcome::Primary));
        assert_eq!(
            primary.calls(),
            vec![(
                document.payload().to_string(),
                "figma_color_styles.json".to_string(),
                "application/json".to_string()
            )]
        );
        assert!(fallback.calls().is_empty());
    }

    #[test]
    fn test_primary_failure_falls_back_with_identical_content() {
        let document = figma_document();
        let (primary, fallback) = (RecordingDelivery::failing(), RecordingDelivery::default());

        let outcome = deliver_with_fallback(&document, &primary, &fallback).unwrap();
        let DeliveryOutcome::Fallback { primary_error } = outcome else {
            panic!("expected the fallback to carry the document");
        };
        assert!(primary_error.to_string().contains("clipboard unavailable"));

        assert_eq!(primary.calls().len(), 1);
        assert_eq!(fallback.calls(), primary.calls());
    }

    #[test]
    fn test_both_channels_failing_reports_both() {
        let document = figma_document();
        let (primary, fallback) = (RecordingDelivery::failing(), RecordingDelivery::failing());

        let error = deliver_with_fallback(&document, &primary, &fallback).unwrap_err();
        assert!(matches!(error, DeliveryError::FallbackFailed { .. }));
        assert_eq!(primary.calls().len(), 1);
        assert_eq!(fallback.calls().len(), 1);
    }

    #[test]
    fn test_file_delivery_falls_back_to_stream() {
        let document = figma_document();
        let directory = tempfile::tempdir().unwrap();

        let files = FileDelivery::new(directory.path());
        let stream = WriterDelivery::new(Vec::new());
        let outcome = deliver_with_fallback(&document, &files, &stream).unwrap();
        assert!(matches!(outcome, DeliveryOutcome::Primary));
        let written = fs::read_to_string(directory.path().join("figma_color_styles.json")).unwrap();
        assert_eq!(written, document.payload());
        assert!(stream.into_inner().is_empty());

        let missing = FileDelivery::new(directory.path().join("missing"));
        let stream = WriterDelivery::new(Vec::new());
        let outcome = deliver_with_fallback(&document, &missing, &stream).unwrap();
        assert!(matches!(
            outcome,
            DeliveryOutcome::Fallback {
                primary_error: DeliveryError::Io { .. }
            }
        ));
        assert_eq!(stream.into_inner(), written.into_bytes());
    }
}
