//! Entity behavior against a mock printer: availability transitions, state
//! caching, and the inert switch.

use std::net::SocketAddr;

use pretty_assertions::assert_eq;
use testresult::TestResult;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    task::JoinHandle,
};
use zortrax_api::{Camera, Entity, PrinterConfig, Sensor, Switch};

/// Serve the given replies to sequential connections, closing each like the
/// real printer does. The handle resolves once the listener is gone, after
/// which further connects are refused.
async fn mock_printer(replies: Vec<String>) -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        for reply in replies {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut prefix = [0u8; 2];
            socket.read_exact(&mut prefix).await.unwrap();
            let mut request = vec![0u8; u16::from_be_bytes(prefix) as usize];
            socket.read_exact(&mut request).await.unwrap();

            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        }
    });
    (addr, handle)
}

fn printer_config(addr: SocketAddr) -> PrinterConfig {
    PrinterConfig {
        name: "Test Printer".to_string(),
        host: addr.ip().to_string(),
        port: addr.port(),
        quality: 55,
    }
}

fn status_reply(fields: &[(&str, &str)]) -> String {
    let fields: Vec<serde_json::Value> = fields
        .iter()
        .map(|(name, value)| serde_json::json!({"name": name, "value": value}))
        .collect();
    serde_json::json!({
        "responses": [{"type": "status", "status": "1", "fields": fields}],
    })
    .to_string()
}

#[tokio::test]
async fn test_sensor_becomes_unavailable_but_keeps_attributes() -> TestResult {
    let (addr, handle) = mock_printer(vec![status_reply(&[
        ("printerStatus", "READY"),
        ("serialNumber", "Z123"),
    ])])
    .await;

    let mut sensor = Sensor::new(&printer_config(addr));
    assert!(!sensor.available());
    assert_eq!(sensor.state(), None);

    sensor.update().await?;
    assert!(sensor.available());
    assert_eq!(sensor.state(), Some("READY"));
    assert_eq!(sensor.attributes().unwrap().serial_number(), Some("Z123"));
    assert!(sensor.last_updated().is_some());

    // The printer goes away; the next poll must clear availability without
    // touching the cached attributes.
    handle.await?;
    assert!(sensor.update().await.is_err());
    assert!(!sensor.available());
    assert_eq!(sensor.state(), None);
    assert_eq!(sensor.attributes().unwrap().serial_number(), Some("Z123"));
    Ok(())
}

#[tokio::test]
async fn test_sensor_replaces_the_snapshot_whole() -> TestResult {
    let (addr, _handle) = mock_printer(vec![
        status_reply(&[("printerStatus", "READY"), ("currentMaterialId", "7")]),
        status_reply(&[("printerStatus", "PRINTING")]),
    ])
    .await;

    let mut sensor = Sensor::new(&printer_config(addr));
    sensor.update().await?;
    assert_eq!(sensor.attributes().unwrap().get("currentMaterialId"), Some("7"));

    sensor.update().await?;
    let snapshot = sensor.attributes().unwrap();
    assert_eq!(snapshot.printer_status(), Some("PRINTING"));
    // No merging: the field the second poll did not report is gone.
    assert_eq!(snapshot.get("currentMaterialId"), None);
    assert_eq!(snapshot.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_switch_tracks_printing_and_stays_inert() -> TestResult {
    let (addr, handle) = mock_printer(vec![status_reply(&[
        ("printerStatus", "PRINTING"),
        ("printingInProgress", "1"),
    ])])
    .await;

    let mut switch = Switch::new(&printer_config(addr));
    assert_eq!(switch.is_on(), None);

    switch.update().await?;
    assert_eq!(switch.is_on(), Some(true));

    // The on/off actions log and change nothing.
    switch.turn_off();
    switch.turn_on();
    assert_eq!(switch.is_on(), Some(true));

    handle.await?;
    assert!(switch.update().await.is_err());
    assert!(!switch.available());
    assert_eq!(switch.is_on(), None);
    Ok(())
}

#[tokio::test]
async fn test_camera_gates_its_frame_on_availability() -> TestResult {
    use base64::{engine::general_purpose, Engine};
    use std::io::Cursor;

    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([80, 120, 160]));
    let mut png = Vec::new();
    image::DynamicImage::ImageRgb8(img).write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;
    let reply = serde_json::json!({
        "responses": [{
            "type": "getCameraPreview",
            "status": "1",
            "cameraPreviewData": general_purpose::STANDARD.encode(&png),
        }],
    })
    .to_string();

    let (addr, handle) = mock_printer(vec![reply]).await;
    let mut camera = Camera::new(&printer_config(addr));
    assert_eq!(camera.name(), "Test Printer Camera");
    assert_eq!(camera.image(), None);

    camera.update().await?;
    let frame = camera.image().expect("frame after a successful poll");
    assert_eq!(image::guess_format(frame)?, image::ImageFormat::Jpeg);

    // Unreachable printer: no image is handed out, even though the last
    // frame stays cached for the next recovery.
    handle.await?;
    assert!(camera.update().await.is_err());
    assert!(!camera.available());
    assert_eq!(camera.image(), None);
    Ok(())
}

#[tokio::test]
async fn test_malformed_reply_marks_the_entity_unavailable() -> TestResult {
    // A reply with a failure status: received, parsed, but untrustworthy.
    let reply = r#"{"responses":[{"type":"status","status":"0"}]}"#.to_string();
    let (addr, _handle) = mock_printer(vec![reply]).await;

    let mut sensor = Sensor::new(&printer_config(addr));
    let err = sensor.update().await.unwrap_err();
    assert!(!err.is_unavailable(), "malformed replies are not connectivity failures");
    assert!(!sensor.available());
    assert_eq!(sensor.state(), None);
    Ok(())
}
