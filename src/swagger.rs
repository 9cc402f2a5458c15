use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::notification::send_notif::send_notif_handler,
    ),
    components(
        schemas(
            crate::models::SendNotifReq,

            crate::models::GenericResponse,
            crate::models::SendNotifResponse,
        )
    ),
    tags(
        (name = "Notification API", description = "API for sending user notifications")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/send-notif"));
        assert_eq!(doc.paths.paths.len(), 1);
        let schemas = doc.components.unwrap().schemas;
        assert!(schemas.contains_key("SendNotifReq"));
        assert!(schemas.contains_key("SendNotifResponse"));
    }
}
