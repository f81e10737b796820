use std::sync::Arc;

use crate::application::ports::ProviderClient;
use crate::application::services::{TranscriptionPipeline, TransformEngine};

pub struct AppState<P>
where
    P: ProviderClient,
{
    pub transcription_pipeline: Arc<TranscriptionPipeline<P>>,
    pub transform_engine: Arc<TransformEngine<P>>,
}

impl<P> Clone for AppState<P>
where
    P: ProviderClient,
{
    fn clone(&self) -> Self {
        Self {
            transcription_pipeline: Arc::clone(&self.transcription_pipeline),
            transform_engine: Arc::clone(&self.transform_engine),
        }
    }
}
