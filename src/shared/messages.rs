//! Message types posted from background work to the UI thread

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;

use crate::lexicon::Lexicons;
use crate::vision::{DecodedImage, RecognitionResult};

/// Completion events delivered to the reader
#[derive(Debug)]
pub enum ReaderMessage {
    /// The picked image was decoded and measured
    ImageDecoded {
        generation: u64,
        image: DecodedImage,
    },
    /// OCR finished for an image
    RecognitionFinished {
        generation: u64,
        result: Result<RecognitionResult, String>,
    },
    /// Loading the picked image failed
    ImageFailed { generation: u64, error: String },
    /// Lexicon warm-up finished
    LexiconReady(Arc<Lexicons>),
}

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Sending half of the reader channel, with an optional repaint hook
#[derive(Clone)]
pub struct MessageSender {
    tx: Sender<ReaderMessage>,
    waker: Option<Waker>,
}

impl MessageSender {
    /// Call `waker` after every successful send
    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Some(Arc::new(waker));
        self
    }

    /// Post a message; returns false when the receiver is gone
    pub fn send(&self, message: ReaderMessage) -> bool {
        if self.tx.send(message).is_err() {
            return false;
        }
        if let Some(waker) = &self.waker {
            waker();
        }
        true
    }
}

/// Create the reader channel
pub fn reader_channel() -> (MessageSender, Receiver<ReaderMessage>) {
    let (tx, rx) = unbounded();
    (MessageSender { tx, waker: None }, rx)
}
