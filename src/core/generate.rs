//! Generate → persist → display flow.
//!
//! ```text
//! IDLE --(image + key)--> GENERATING --(text)--> SUCCESS --(persist, unbind)--> IDLE
//!                                    \--(err)--> FAILURE --(report)----------> IDLE
//! ```

use crate::client::{GenerationRequest, Generator, ProductImage};
use crate::core::session::SessionBuffer;
use crate::errors::{AppError, AppResult};
use crate::models::{PostRecord, Style};
use crate::store::HistoryStore;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Generating,
    Success,
    Failure,
}

/// What the user filled in before pressing "generate".
#[derive(Debug, Clone, Copy)]
pub struct GenerateInput<'a> {
    pub image: Option<&'a ProductImage>,
    pub product_name: &'a str,
    pub style: Style,
}

#[derive(Debug)]
pub struct GenerationFlow {
    state: FlowState,
}

impl Default for GenerationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationFlow {
    pub fn new() -> Self {
        Self {
            state: FlowState::Idle,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    fn enter(&mut self, next: FlowState) {
        debug!(from = ?self.state, to = ?next, "generation flow");
        self.state = next;
    }

    /// Run one generation.
    ///
    /// Preconditions (image, then credential) fail without leaving IDLE.
    /// On any failure the store and the buffer are left as they were.
    pub fn run<G: Generator + ?Sized>(
        &mut self,
        store: &HistoryStore,
        buffer: &mut SessionBuffer,
        generator: Option<&G>,
        input: GenerateInput<'_>,
    ) -> AppResult<PostRecord> {
        let image = input.image.ok_or(AppError::MissingImage)?;
        let generator = generator.ok_or(AppError::MissingCredential)?;

        self.enter(FlowState::Generating);
        let req = GenerationRequest {
            image,
            product_name: input.product_name,
            style: input.style.label(),
        };

        let text = match generator.generate(&req) {
            Ok(text) => text,
            Err(e) => {
                self.enter(FlowState::Failure);
                self.enter(FlowState::Idle);
                return Err(e);
            }
        };

        self.enter(FlowState::Success);
        let saved = store.add(input.product_name, input.style.label(), &text);
        self.enter(FlowState::Idle);
        let record = saved?;

        buffer.on_generated(&text);
        info!(timestamp = %record.timestamp, product = %record.product_name, "post generated");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::tempdir;

    struct FakeGenerator {
        reply: Result<&'static str, &'static str>,
        calls: Cell<usize>,
    }

    impl FakeGenerator {
        fn ok(text: &'static str) -> Self {
            Self {
                reply: Ok(text),
                calls: Cell::new(0),
            }
        }

        fn failing(msg: &'static str) -> Self {
            Self {
                reply: Err(msg),
                calls: Cell::new(0),
            }
        }
    }

    impl Generator for FakeGenerator {
        fn generate(&self, req: &GenerationRequest<'_>) -> AppResult<String> {
            self.calls.set(self.calls.get() + 1);
            assert_eq!(req.style, Style::Bestie.label());
            self.reply
                .map(str::to_string)
                .map_err(|m| AppError::Generation(m.to_string()))
        }
    }

    fn image() -> ProductImage {
        ProductImage {
            file_name: "p.jpg".into(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        }
    }

    fn input(img: Option<&ProductImage>) -> GenerateInput<'_> {
        GenerateInput {
            image: img,
            product_name: "Widget",
            style: Style::Bestie,
        }
    }

    #[test]
    fn success_persists_and_leaves_buffer_unbound() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("h.csv"));
        let mut buffer = SessionBuffer::new();
        let old = store.add("Old", "🔥 熱血叫賣風", "old text").unwrap();
        buffer.on_load(&old);

        let img = image();
        let generator = FakeGenerator::ok("Buy now!");
        let mut flow = GenerationFlow::new();
        let rec = flow
            .run(&store, &mut buffer, Some(&generator), input(Some(&img)))
            .unwrap();

        assert_eq!(flow.state(), FlowState::Idle);
        assert_eq!(rec.content, "Buy now!");
        assert_eq!(rec.style, "💖 溫柔閨蜜風");
        assert_eq!(store.load().unwrap().len(), 2);
        assert_eq!(buffer.content(), "Buy now!");
        assert!(!buffer.can_save());
    }

    #[test]
    fn missing_credential_changes_nothing() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("h.csv"));
        let mut buffer = SessionBuffer::new();
        buffer.edit("draft");

        let img = image();
        let mut flow = GenerationFlow::new();
        let res = flow.run::<FakeGenerator>(&store, &mut buffer, None, input(Some(&img)));

        assert!(matches!(res, Err(AppError::MissingCredential)));
        assert_eq!(flow.state(), FlowState::Idle);
        assert!(store.load().unwrap().is_empty());
        assert_eq!(buffer.content(), "draft");
    }

    #[test]
    fn missing_image_is_checked_before_calling_out() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("h.csv"));
        let mut buffer = SessionBuffer::new();
        let generator = FakeGenerator::ok("never");

        let res = GenerationFlow::new().run(&store, &mut buffer, Some(&generator), input(None));
        assert!(matches!(res, Err(AppError::MissingImage)));
        assert_eq!(generator.calls.get(), 0);
    }

    #[test]
    fn service_failure_surfaces_message_verbatim() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("h.csv"));
        let mut buffer = SessionBuffer::new();
        let old = store.add("Old", "🔥 熱血叫賣風", "old text").unwrap();
        buffer.on_load(&old);

        let img = image();
        let generator = FakeGenerator::failing("quota exceeded");
        let mut flow = GenerationFlow::new();
        let err = flow
            .run(&store, &mut buffer, Some(&generator), input(Some(&img)))
            .unwrap_err();

        assert!(matches!(&err, AppError::Generation(m) if m == "quota exceeded"));
        assert_eq!(flow.state(), FlowState::Idle);
        assert_eq!(store.load().unwrap(), vec![old.clone()]);
        assert_eq!(buffer.bound_timestamp(), Some(old.timestamp.as_str()));
        assert_eq!(generator.calls.get(), 1);
    }
}
