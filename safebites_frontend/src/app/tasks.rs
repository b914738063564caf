use std::sync::mpsc::Sender;
use std::thread;

use log::error;

use crate::api::ApiClient;
use crate::image_ref::{FileImageRef, ImageRef, IMAGE_EXTENSIONS};

use super::messages::AppMessage;

pub fn pick_image(tx: Sender<AppMessage>) {
    thread::spawn(move || {
        let mut dialog = rfd::FileDialog::new().add_filter("Images", IMAGE_EXTENSIONS);
        if let Some(dir) = dirs::picture_dir() {
            dialog = dialog.set_directory(dir);
        }
        let result = match dialog.pick_file() {
            Some(path) => {
                let file = FileImageRef::new(path);
                file.check_readable().map(|()| Some(ImageRef::File(file)))
            }
            None => Ok(None),
        };
        if tx.send(AppMessage::ImagePicked(result)).is_err() {
            error!("failed to send ImagePicked message");
        }
    });
}

pub fn submit_image(client: ApiClient, tx: Sender<AppMessage>, submission: u64, image: ImageRef) {
    thread::spawn(move || {
        let result = client.extract(&image);
        let message = AppMessage::UploadFinished { submission, result };
        if tx.send(message).is_err() {
            error!("failed to send UploadFinished message");
        }
    });
}
