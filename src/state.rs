use crate::infrastructure::media::Transcoder;
use crate::modules::processing::pipeline::JobPipeline;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: JobPipeline,
    pub transcoder: Arc<dyn Transcoder>,
}

impl AppState {
    pub fn new(pipeline: JobPipeline, transcoder: Arc<dyn Transcoder>) -> Self {
        Self {
            pipeline,
            transcoder,
        }
    }
}
