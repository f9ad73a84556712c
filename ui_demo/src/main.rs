//! UI render target demo
//!
//! Runs the render target headless on the software backend: allocates the
//! texture, resizes the "window", draws a few images with different scale
//! modes and writes the result to a PNG.
//!
//! Usage: `ui_demo [config.toml|config.ron] [output.png]`

use std::cell::RefCell;
use std::rc::Rc;

use rpg_engine::foundation::{logging, time::FrameClock};
use rpg_engine::prelude::*;

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("UI render target was not created")]
    NoTarget,
}

/// A spell effect as it would be declared by the effect system
struct SpellEffect {
    name: &'static str,
    targets: TargetTypes,
    elements: ElementTypes,
    stations: MagicCraftingStations,
    bundle: BundleTypes,
}

fn main() {
    logging::init_with_default("info");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), DemoError> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            log::info!("Loading UI config from {}", path);
            UiConfig::load_from_file(path)?
        }
        None => UiConfig::default(),
    };
    let output_path = args.next().unwrap_or_else(|| "ui_render_target.png".to_string());

    describe_effects();

    let mut backend = SoftwareBackend::new(&config.backend);
    let canvas: SharedOutputSurface = OutputCanvas::new().into_shared();
    let mut target = UIRenderTarget::new(config.render_target.clone(), Some(Rc::clone(&canvas)));

    let created = Rc::new(RefCell::new(Vec::new()));
    let sink = created.clone();
    target.on_create_target_texture(move |event: &Event| {
        if let Some((width, height)) = event.get_size() {
            sink.borrow_mut().push((width, height));
        }
    });

    let banner = backend.upload_image(&ImageData::solid_color(4, 1, [200, 60, 40, 255]))?;
    let icon = backend.upload_image(&ImageData::solid_color(1, 1, [40, 120, 220, 200]))?;
    let atlas = backend.upload_image(&checkerboard(8))?;

    let mut clock = FrameClock::new();
    target.awake(&mut backend);

    for frame in 0..4 {
        if frame == 2 {
            // Window resize: the render target follows on the next update
            let (width, height) = backend.screen_size();
            backend.resize_screen(width / 2, height / 2);
        }

        let time = clock.tick();
        target.update(&mut backend);
        target.on_gui(&mut backend, GuiEventType::Layout);
        target.on_gui(&mut backend, GuiEventType::Repaint);

        let rect = target.target_rect();
        let half = Rect::new(rect.x, rect.y, rect.width * 0.5, rect.height * 0.5);
        target.draw_texture_scaled(&mut backend, half, banner, ScaleMode::ScaleToFit, true, 0.0);
        target.draw_texture_scaled(
            &mut backend,
            Rect::new(rect.width * 0.5, 0.0, rect.width * 0.5, rect.height * 0.5),
            atlas,
            ScaleMode::ScaleAndCrop,
            false,
            0.0,
        );
        target.draw_texture_with_tex_coords(
            &mut backend,
            Rect::new(0.0, rect.height * 0.5, rect.width * 0.5, rect.height * 0.5),
            atlas,
            Rect::new(0.0, 0.0, 0.5, 0.5),
            false,
        );
        target.draw_texture(&mut backend, Rect::new(rect.width * 0.6, rect.height * 0.6, 32.0, 32.0), icon);

        log::debug!("Frame {} ({:.3} ms)", time.frame, time.delta * 1000.0);
    }

    if let Some(raw_image) = target.diegetic_canvas_raw_image() {
        log::info!(
            "Output canvas shows texture {:?} at {}x{}",
            raw_image.texture, raw_image.size.x, raw_image.size.y
        );
    }
    log::info!("Render texture created {} time(s): {:?}", target.create_count(), created.borrow());

    let texture = target.target_texture().ok_or(DemoError::NoTarget)?;
    backend.save_png(texture, &output_path)?;

    let stats = backend.stats();
    log::info!(
        "{} frames in {:.2}s ({:.1} fps): {} textures created, {} clears, {} draws",
        clock.frame_count(),
        clock.elapsed_secs(),
        clock.average_fps(),
        stats.textures_created,
        stats.clears,
        stats.draws
    );

    for image in [banner, icon, atlas] {
        backend.release_image(image);
    }
    target.release(&mut backend);
    Ok(())
}

fn describe_effects() {
    let effects = [
        SpellEffect {
            name: "Fireball",
            targets: TargetTypes::SINGLE_TARGET_AT_RANGE | TargetTypes::AREA_AT_RANGE,
            elements: ElementTypes::FIRE,
            stations: MagicCraftingStations::SPELL_MAKER | MagicCraftingStations::ITEM_MAKER,
            bundle: BundleTypes::Spell,
        },
        SpellEffect {
            name: "Cure Poison",
            targets: TargetTypes::CASTER_ONLY | TargetTypes::BY_TOUCH,
            elements: ElementTypes::NONE,
            stations: MagicCraftingStations::all(),
            bundle: BundleTypes::Spell,
        },
    ];

    for effect in &effects {
        log::info!(
            "{} [{:?}]: targets {}, elements {}, stations {}",
            effect.name,
            effect.bundle,
            effect.targets,
            if effect.elements.is_empty() { "none".to_string() } else { effect.elements.to_string() },
            effect.stations
        );
        if effect.targets.contains(TargetTypes::AREA_AT_RANGE) {
            log::info!("{} needs an area indicator", effect.name);
        }
    }
}

/// Black and white checkerboard with `size` squares per side
fn checkerboard(size: u32) -> ImageData {
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let value = if (x + y) % 2 == 0 { 255 } else { 0 };
            data.extend_from_slice(&[value, value, value, 255]);
        }
    }
    ImageData { data, width: size, height: size }
}
