//! Drive a preview session the way an editor UI would.
//!
//! Run with: cargo run --example live_session

use jsx_live_preview::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let (port, subscription) = error_channel();
    let frame = MemoryFrame::attached().with_parent(port.clone());
    let viewer = frame.clone();

    let config = PreviewConfig::builder().auto_compile(false).build();
    let host = PreviewHost::new(config, frame)?;
    let (session, mut handle) = PreviewSession::new(host, subscription);
    let task = tokio::spawn(session.run());

    println!("=== Manual compile ===");
    handle
        .send(HostEvent::Edit(
            "function App() { throw new Error(\"boom\"); }".to_string(),
        ))
        .await;
    handle.send(HostEvent::Compile).await;

    // No JavaScript engine here: report what the guarded block would post.
    port.post_compile_error("Error: boom");
    if let Some(display) = handle.error_changed().await {
        println!("error display: {:?}", display);
    }

    println!("\n=== Template switch ===");
    handle.send(HostEvent::ToggleAutoCompile).await;
    handle
        .send(HostEvent::SelectTemplate("todoList".to_string()))
        .await;
    drop(handle);

    let mut host = match task.await {
        Ok(host) => host,
        Err(e) => {
            eprintln!("session task failed: {}", e);
            return Ok(());
        }
    };
    println!("selected: {}", host.selected_template());
    println!("documents loaded: {}", viewer.generation());
    println!("error display: {:?}", host.error());
    for note in host.take_notifications() {
        println!("[{:?}] {}: {}", note.kind, note.title, note.description);
    }

    Ok(())
}
