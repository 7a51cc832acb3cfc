//! Example: serve a synthetic volume through the package service and write the archive
//!
//! Run with: cargo run --example package_volume [output.zip]

use ndarray::Array3;
use vtkjs_volume::{
    read_archive, ConverterConfig, DatasetSource, InMemoryLoader, NdArray, PackageRequest,
    PackageService, SanitizePolicy, VolumeConverter,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // A 64^3 radial gradient with a few non-finite samples mixed in
    let size = 64usize;
    let center = (size as f32 - 1.0) / 2.0;
    let mut volume = Array3::from_shape_fn((size, size, size), |(i, j, k)| {
        let (x, y, z) = (i as f32 - center, j as f32 - center, k as f32 - center);
        (x * x + y * y + z * z).sqrt()
    });
    volume[[0, 0, 0]] = f32::NAN;
    volume[[1, 0, 0]] = f32::INFINITY;

    let loader = InMemoryLoader::new();
    loader.insert(
        DatasetSource::new("gradient.h5", "/entry/data"),
        NdArray::from_ndarray(&volume),
    );

    let config = ConverterConfig::default()
        .with_sanitize(SanitizePolicy::default().with_pos_inf(100.0))
        .with_pretty_metadata(true);
    let service = PackageService::new(loader, VolumeConverter::new(config)?);

    let request = PackageRequest::from_pairs([("filename", "gradient.h5"), ("path", "/entry/data")]);
    let response = service.handle(&request).await;
    anyhow::ensure!(
        response.is_success(),
        "request failed with {}: {}",
        response.status,
        String::from_utf8_lossy(&response.body)
    );

    println!("Archive: {} bytes ({})", response.body.len(), response.content_type);
    for entry in read_archive(&response.body)? {
        println!("  {:<12} {} bytes", entry.path, entry.bytes.len());
    }

    let missing = service.handle(&PackageRequest::from_pairs([("filename", "gradient.h5")])).await;
    println!("Request without path -> {}", missing.status);

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data.zip".to_string());
    std::fs::write(&output, &response.body)?;
    println!("Wrote {}", output);

    Ok(())
}
