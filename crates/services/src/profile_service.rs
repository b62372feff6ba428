use std::path::Path;

use storage::session_store::SessionStore;

use crate::api::{PortalApi, UploadFile};
use crate::error::ProfileError;

pub const PORTRAIT_FIELD: &str = "portraitPhoto";
pub const PORTRAIT_FILE_NAME: &str = "portrait.png";

/// A portrait picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortraitPhoto {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl PortraitPhoto {
    /// Read an image file; the MIME type follows its extension.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Io` if the file cannot be read.
    pub fn read(path: &Path) -> Result<Self, ProfileError> {
        let bytes = std::fs::read(path)?;
        Ok(Self {
            mime: mime_for(path).to_owned(),
            bytes,
        })
    }

    fn into_upload(self) -> UploadFile {
        UploadFile {
            field: PORTRAIT_FIELD.to_owned(),
            file_name: PORTRAIT_FILE_NAME.to_owned(),
            mime: self.mime,
            bytes: self.bytes,
        }
    }
}

/// Profile completion: uploading the portrait photo.
#[derive(Clone)]
pub struct ProfileService {
    api: PortalApi,
    session: SessionStore,
}

impl ProfileService {
    #[must_use]
    pub fn new(api: PortalApi, session: SessionStore) -> Self {
        Self { api, session }
    }

    /// Upload the portrait for the signed-in user; returns the server message.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotSignedIn` or `ProfileError::NoPhoto` without
    /// making a request, and `ProfileError::Api` if the upload fails.
    pub async fn upload_portrait(
        &self,
        photo: Option<PortraitPhoto>,
    ) -> Result<String, ProfileError> {
        let user = self.session.user().await?.ok_or(ProfileError::NotSignedIn)?;
        let photo = photo
            .filter(|photo| !photo.bytes.is_empty())
            .ok_or(ProfileError::NoPhoto)?;
        let size = photo.bytes.len();
        let message = self
            .api
            .upload_portrait(&user.email, photo.into_upload())
            .await?;
        tracing::info!(username = %user.username, size, "portrait uploaded");
        Ok(message)
    }
}

fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_follows_extension() {
        assert_eq!(mime_for(Path::new("me.JPG")), "image/jpeg");
        assert_eq!(mime_for(Path::new("me.webp")), "image/webp");
        assert_eq!(mime_for(Path::new("me")), "image/png");
    }

    #[test]
    fn upload_uses_fixed_field_and_name() {
        let upload = PortraitPhoto {
            mime: "image/jpeg".into(),
            bytes: vec![1],
        }
        .into_upload();
        assert_eq!(upload.field, "portraitPhoto");
        assert_eq!(upload.file_name, "portrait.png");
        assert_eq!(upload.mime, "image/jpeg");
    }
}
