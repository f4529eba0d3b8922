//! WAV persistence tests
//!
//! Files are read back with hound to check format and content.

use chrono::{TimeZone, Utc};
use demo_mc::generator::Waveform;
use demo_mc::persistence::{PersistenceError, WavPersistence, SAMPLE_RATE};
use demo_mc::prompt::{GenerationRequest, Mood, Tempo};
use tempfile::TempDir;

#[test]
fn test_save_creates_output_dir_and_writes_float_wav() {
    let temp_dir = TempDir::new().unwrap();
    let persistence = WavPersistence::new(temp_dir.path().join("outputs"));
    let request = GenerationRequest::new("jazz", Mood::Happy, Tempo::Fast, 5);
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let path = persistence.track_path(&request, &now);

    let samples = vec![0.0, 0.5, -0.5, 1.0];
    persistence
        .save(&Waveform::mono(samples.clone()), SAMPLE_RATE, &path)
        .unwrap();

    assert_eq!(
        path,
        temp_dir
            .path()
            .join("outputs")
            .join("jazzhappyfast_20240601120000.wav")
    );

    let mut reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.sample_rate, 32_000);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 32);
    assert_eq!(spec.sample_format, hound::SampleFormat::Float);

    let read: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
    assert_eq!(read, samples);
}

#[test]
fn test_save_stereo() {
    let temp_dir = TempDir::new().unwrap();
    let persistence = WavPersistence::new(temp_dir.path());
    let path = temp_dir.path().join("stereo.wav");

    let waveform = Waveform {
        channels: 2,
        samples: vec![0.1, -0.1, 0.2, -0.2],
    };
    persistence.save(&waveform, SAMPLE_RATE, &path).unwrap();

    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().channels, 2);
    assert_eq!(reader.duration(), 2);
}

#[test]
fn test_same_second_overwrites() {
    let temp_dir = TempDir::new().unwrap();
    let persistence = WavPersistence::new(temp_dir.path());
    let request = GenerationRequest::default();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let path = persistence.track_path(&request, &now);

    persistence
        .save(&Waveform::mono(vec![0.1; 10]), SAMPLE_RATE, &path)
        .unwrap();
    persistence
        .save(&Waveform::mono(vec![0.2; 20]), SAMPLE_RATE, &path)
        .unwrap();

    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.duration(), 20);
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
}

#[test]
fn test_concurrent_saves_to_same_path() {
    let temp_dir = TempDir::new().unwrap();
    let persistence = WavPersistence::new(temp_dir.path().join("outputs"));
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let path = persistence.track_path(&GenerationRequest::default(), &now);

    for _ in 0..20 {
        let handles: Vec<_> = [0.1f32, 0.2f32]
            .into_iter()
            .map(|value| {
                let persistence = persistence.clone();
                let path = path.clone();
                std::thread::spawn(move || {
                    persistence.save(&Waveform::mono(vec![value; 4_000]), SAMPLE_RATE, &path)
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().expect("Concurrent save should succeed");
        }

        // The survivor is one complete write, never a mix of both
        let mut reader = hound::WavReader::open(&path).unwrap();
        let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(samples.len(), 4_000);
        assert!(samples.iter().all(|s| *s == samples[0]));
    }

    let entries: Vec<_> = std::fs::read_dir(temp_dir.path().join("outputs"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("lo-fichillmid_20240101000000.wav")]);
}

#[test]
fn test_empty_waveform_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let persistence = WavPersistence::new(temp_dir.path());
    let path = temp_dir.path().join("empty.wav");

    let result = persistence.save(&Waveform::mono(Vec::new()), SAMPLE_RATE, &path);
    assert!(matches!(result, Err(PersistenceError::EmptyWaveform)));
    assert!(!path.exists());
}

#[test]
fn test_unwritable_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("outputs");
    std::fs::write(&blocker, b"file, not a directory").unwrap();

    let persistence = WavPersistence::new(&blocker);
    let path = blocker.join("track.wav");
    let result = persistence.save(&Waveform::mono(vec![0.0; 4]), SAMPLE_RATE, &path);

    assert!(matches!(result, Err(PersistenceError::CreateDir { .. })));
}
