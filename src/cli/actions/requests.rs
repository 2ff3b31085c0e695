use crate::api;
use crate::cli::actions::AppContext;
use crate::client::ImagePart;
use crate::router::{Navigation, PATIENT_HOME};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// List the signed-in patient's diagnosis requests.
///
/// # Errors
/// Returns an error if the route guard bounces the caller or the request
/// fails.
pub async fn list(context: &AppContext) -> Result<()> {
    guard(context).await?;

    let requests = api::diagnosis::list(&context.client)
        .await
        .context("could not list diagnosis requests")?;

    println!("{}", serde_json::to_string_pretty(&requests)?);

    Ok(())
}

/// Submit a new diagnosis request from an image on disk.
///
/// # Errors
/// Returns an error if the image cannot be read or the upload fails.
pub async fn submit(context: &AppContext, image: &Path) -> Result<()> {
    guard(context).await?;

    let part = read_image(image)?;

    let request = api::diagnosis::submit(&context.client, part)
        .await
        .context("could not submit the diagnosis request")?;

    println!("{}", serde_json::to_string_pretty(&request)?);

    Ok(())
}

/// Show one diagnosis request by id.
///
/// # Errors
/// Returns an error if the route guard bounces the caller or the request
/// fails.
pub async fn show(context: &AppContext, id: i64) -> Result<()> {
    guard(context).await?;

    let request = api::diagnosis::fetch(&context.client, id)
        .await
        .with_context(|| format!("could not fetch diagnosis request {id}"))?;

    println!("{}", serde_json::to_string_pretty(&request)?);

    Ok(())
}

/// Requests commands follow the same gate as the patient pages.
async fn guard(context: &AppContext) -> Result<()> {
    let session = context.session.snapshot().await;

    match context.navigator.navigate(PATIENT_HOME, &session).await {
        Navigation::Proceed { .. } => Ok(()),
        Navigation::Redirect(target) => {
            bail!("not available for this session, sign in as a patient (redirected to {target})")
        }
        Navigation::NotFound => bail!("no such route: {PATIENT_HOME}"),
    }
}

fn read_image(path: &Path) -> Result<ImagePart> {
    let bytes =
        fs::read(path).with_context(|| format!("could not read image {}", path.display()))?;

    let file_name = path
        .file_name()
        .map_or_else(|| "upload".to_string(), |name| name.to_string_lossy().into_owned());

    Ok(ImagePart {
        mime: mime_for(path).to_string(),
        file_name,
        bytes,
    })
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_mime_for_known_extensions() {
        assert_eq!(mime_for(Path::new("lesion.jpg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("lesion.JPEG")), "image/jpeg");
        assert_eq!(mime_for(Path::new("lesion.png")), "image/png");
        assert_eq!(mime_for(Path::new("lesion.bmp")), "application/octet-stream");
        assert_eq!(mime_for(Path::new("lesion")), "application/octet-stream");
    }

    #[test]
    fn test_read_image_carries_file_name_and_bytes() {
        let mut file = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .expect("tempfile");
        file.write_all(b"not really a png").expect("write");

        let part = read_image(file.path()).expect("read_image");

        assert_eq!(part.mime, "image/png");
        assert_eq!(part.bytes, b"not really a png");
        assert!(part.file_name.ends_with(".png"));
    }

    #[test]
    fn test_read_image_missing_file() {
        let result = read_image(Path::new("/nonexistent/lesion.png"));
        assert!(result.is_err());
    }
}
