use axum::response::Html;

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(
        "<h1>Wagate</h1>\
         <p>Try <code>/mcp/get_recent_messages</code> or POST to \
         <code>/mcp/send_message</code>.</p>",
    )
}
