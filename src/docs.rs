use crate::modules::processing::dto::*;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::processing::handler::process_video,
        crate::modules::processing::handler::process_local_video,
    ),
    components(
        schemas(
            PushRequest, PushMessage, JobResponse,
            LocalTranscodeRequest, LocalTranscodeResponse,
        )
    ),
    tags(
        (name = "Processing", description = "Raw video transcoding jobs")
    )
)]
pub struct ApiDoc;
