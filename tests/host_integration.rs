use std::path::Path;
use std::time::Duration;

use image::{Rgba, RgbaImage};
use rust_slideshow::config::Configuration;
use rust_slideshow::engine::Phase;
use rust_slideshow::events::Event;
use rust_slideshow::interfaces::Size;
use rust_slideshow::tasks::host::Host;
use rust_slideshow::tasks::input::Input;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

fn write_png(dir: &Path, name: &str, color: Rgba<u8>) {
    RgbaImage::from_pixel(8, 8, color)
        .save(dir.join(name))
        .unwrap();
}

fn config(frame_output: &Path) -> Configuration {
    Configuration {
        display_duration: Duration::from_millis(50),
        surface: Size {
            width: 16,
            height: 16,
        },
        shuffle_seed: Some(11),
        frame_output: Some(frame_output.to_path_buf()),
        video_player: Vec::new(),
        ..Configuration::default()
    }
    .validated()
    .unwrap()
}

fn frame_color(path: &Path) -> Option<Rgba<u8>> {
    let img = image::open(path).ok()?.to_rgba8();
    Some(*img.get_pixel(0, 0))
}

#[tokio::test]
async fn images_advance_on_their_own() {
    let media = tempfile::tempdir().unwrap();
    write_png(media.path(), "red.png", RED);
    write_png(media.path(), "blue.png", BLUE);
    let out_dir = tempfile::tempdir().unwrap();
    let frame = out_dir.path().join("frame.png");

    let mut host = Host::new(&config(&frame)).unwrap();
    host.dispatch(Event::FolderSelected(media.path().to_path_buf()));
    assert_eq!(host.engine().phase(), Phase::PlayingImage);
    let first = frame_color(&frame).expect("first frame written");

    let cancel = CancellationToken::new();
    let (_input_tx, input_rx) = mpsc::channel::<Input>(4);
    let run = tokio::spawn(host.run(input_rx, cancel.clone()));

    // Two items never repeat back to back, so the next frame is the other color.
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut advanced = false;
    while Instant::now() < deadline {
        if frame_color(&frame).is_some_and(|c| c != first) {
            advanced = true;
            break;
        }
        sleep(Duration::from_millis(20)).await;
    }
    cancel.cancel();
    run.await.unwrap().unwrap();
    assert!(advanced, "slideshow did not advance");
}

#[tokio::test]
async fn quit_command_ends_the_run() {
    let media = tempfile::tempdir().unwrap();
    write_png(media.path(), "red.png", RED);
    let out_dir = tempfile::tempdir().unwrap();
    let frame = out_dir.path().join("frame.png");

    let mut host = Host::new(&config(&frame)).unwrap();
    host.dispatch(Event::FolderSelected(media.path().to_path_buf()));

    let cancel = CancellationToken::new();
    let (input_tx, input_rx) = mpsc::channel::<Input>(4);
    let run = tokio::spawn(host.run(input_rx, cancel.clone()));
    input_tx.send(Input::Event(Event::KeySpace)).await.unwrap();
    input_tx.send(Input::Quit).await.unwrap();

    tokio::time::timeout(Duration::from_secs(5), run)
        .await
        .expect("host did not stop")
        .unwrap()
        .unwrap();
    assert!(cancel.is_cancelled());
}

#[tokio::test]
async fn unplayable_video_is_skipped() {
    let media = tempfile::tempdir().unwrap();
    write_png(media.path(), "red.png", RED);
    std::fs::write(media.path().join("clip.mp4"), b"not a video").unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let frame = out_dir.path().join("frame.png");

    // No video player configured: every video fails, the image still plays.
    let mut host = Host::new(&config(&frame)).unwrap();
    host.dispatch(Event::FolderSelected(media.path().to_path_buf()));
    assert_eq!(host.engine().phase(), Phase::PlayingImage);
    assert_eq!(frame_color(&frame), Some(RED));
}

#[tokio::test]
async fn folder_of_unplayable_media_halts() {
    let media = tempfile::tempdir().unwrap();
    std::fs::write(media.path().join("broken.jpg"), b"not a jpeg").unwrap();
    std::fs::write(media.path().join("clip.mov"), b"not a video").unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let frame = out_dir.path().join("frame.png");

    let mut host = Host::new(&config(&frame)).unwrap();
    host.dispatch(Event::FolderSelected(media.path().to_path_buf()));
    assert!(host.engine().is_active());
    assert_eq!(host.engine().phase(), Phase::Stopped);
    assert!(!frame.exists());
}

#[tokio::test]
async fn missing_folder_keeps_the_running_show() {
    let media = tempfile::tempdir().unwrap();
    write_png(media.path(), "red.png", RED);
    let out_dir = tempfile::tempdir().unwrap();
    let frame = out_dir.path().join("frame.png");

    let mut host = Host::new(&config(&frame)).unwrap();
    host.dispatch(Event::FolderSelected(media.path().to_path_buf()));
    host.dispatch(Event::FolderSelected(media.path().join("missing")));
    host.dispatch(Event::FolderDropped(media.path().join("red.png")));

    assert_eq!(host.engine().library().len(), 1);
    assert_eq!(host.engine().phase(), Phase::PlayingImage);
}
