use std::path::Path;

use dioxus::prelude::*;
use services::{PortraitPhoto, ProfileError};

use crate::context::AppContext;
use crate::toaster::use_toaster;

fn pick_photo(raw: &str) -> Result<Option<PortraitPhoto>, ProfileError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    PortraitPhoto::read(Path::new(raw)).map(Some)
}

#[component]
pub fn CompleteProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let toaster = use_toaster();
    let mut photo_path = use_signal(String::new);
    let mut uploading = use_signal(|| false);

    let profile = ctx.profile();
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if uploading() {
            return;
        }
        let raw = photo_path();
        let profile = profile.clone();
        spawn(async move {
            uploading.set(true);
            let outcome = match pick_photo(&raw) {
                Ok(photo) => profile.upload_portrait(photo).await,
                Err(err) => Err(err),
            };
            uploading.set(false);
            match outcome {
                Ok(message) => {
                    toaster.success(message);
                    photo_path.set(String::new());
                }
                Err(err) => {
                    tracing::warn!(error = %err, "portrait upload failed");
                    toaster.error(err.to_string());
                }
            }
        });
    };

    rsx! {
        div { class: "page profile-page",
            h2 { "Complete Your Profile" }
            p { class: "profile-page__lead",
                "Upload a clear portrait photo. It appears on your certificates and test sessions."
            }
            form { class: "profile-form", onsubmit: on_submit,
                label { r#for: "portrait-path", "Portrait photo file" }
                input {
                    id: "portrait-path",
                    r#type: "text",
                    placeholder: "/path/to/portrait.png",
                    value: "{photo_path}",
                    oninput: move |evt| photo_path.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: uploading(),
                    if uploading() { "Uploading..." } else { "Upload photo" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_path_means_no_photo() {
        assert!(matches!(pick_photo("   "), Ok(None)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            pick_photo("/definitely/not/here.png"),
            Err(ProfileError::Io(_))
        ));
    }
}
