use anyhow::Result;

use filmstrip_core::{load_sources, AppConfig, Error, FsImageSource, SceneBuilder};

/// Build the strip without a terminal and print what the engine would
/// cycle through.
pub fn run(config: AppConfig, height: u32, scene_prefix: usize) -> Result<()> {
    let sources = load_sources(&FsImageSource, &config.strip.images, &config.strip.weights);
    if sources.is_empty() {
        return Err(Error::EmptyImageSet.into());
    }

    let builder = SceneBuilder::new(config.strip.scene_length, config.strip.contiguous);
    let mut rng = config.strip.rng();
    let (images, scene) = builder.build(&sources, height, &mut rng);

    println!("{} image(s) scaled to height {height}:", images.len());
    for (i, img) in images.iter().enumerate() {
        println!("  [{i}] {}x{}", img.width(), img.height());
    }

    let cycle: u64 = images.iter().map(|img| img.width() as u64).sum();
    println!("combined image width: {cycle}px");

    let mode = if config.strip.contiguous {
        "contiguous"
    } else {
        "random"
    };
    let prefix: Vec<String> = scene
        .iter()
        .take(scene_prefix)
        .map(|slot| slot.to_string())
        .collect();
    println!(
        "scene: {} entries ({mode}), first {}: [{}]",
        scene.len(),
        prefix.len(),
        prefix.join(", ")
    );

    Ok(())
}
