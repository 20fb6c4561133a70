//! Incremental rendering of streamed text fragments.

use std::io::Write;
use std::time::Duration;

use futures::{Stream, StreamExt};

use crate::error::WayfarerError;

/// Writes fragments to a sink as they arrive.
///
/// Each fragment is written and flushed on its own, in arrival order, with no
/// merging or reordering.
pub struct StreamRenderer<W: Write> {
    sink: W,
    pace: Option<Duration>,
}

impl<W: Write> StreamRenderer<W> {
    pub fn new(sink: W) -> Self {
        Self { sink, pace: None }
    }

    /// Pause before each fragment for a typewriter effect.
    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = (!pace.is_zero()).then_some(pace);
        self
    }

    /// Drain `fragments` into the sink.
    ///
    /// Stops at the first error and returns it; whatever was already written
    /// stays written.
    pub async fn render<S>(&mut self, fragments: S) -> Result<(), WayfarerError>
    where
        S: Stream<Item = Result<String, WayfarerError>>,
    {
        futures::pin_mut!(fragments);
        while let Some(fragment) = fragments.next().await {
            let fragment = fragment?;
            if let Some(pace) = self.pace {
                tokio::time::sleep(pace).await;
            }
            self.sink.write_all(fragment.as_bytes())?;
            self.sink.flush()?;
        }
        Ok(())
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
