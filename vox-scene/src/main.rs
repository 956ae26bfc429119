use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glam::Vec3;
use log::{error, info};
use voxbridge::{
    VoxModel, import_model_from_vox,
    io::ChunkTag,
    scene::{CameraFraming, ScenePlan},
};

const USAGE: &str = "\
Usage: vox-scene -vi <input.vox>

Options:
  -vi, --voxin <file>    Input .vox file (required)
  -li, --licenseinfo     Print license info
  -tp, --thirdparty      Print third party licenses
  -V,  --version         Print version
  -h,  --help            Print this help";

const LICENSE: &str = "\
vox-scene

Licensed under either of Apache License, Version 2.0 or MIT license at your option.";

const THIRD_PARTY: &str = "\
byteorder, env_logger, glam, log, rustc-hash, thiserror

Each is distributed under the MIT license or the Apache License, Version 2.0.";

/// Default viewpoint: above and in front of the model, looking back at it.
const CAMERA_DIRECTION: Vec3 = Vec3::new(1.0, 0.6, -0.3);
/// Eye distance from the target, in multiples of the framing radius.
const CAMERA_DISTANCE: f32 = 2.5;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Version,
    License,
    ThirdParty,
    Convert(PathBuf),
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command, String> {
    let mut args = args.into_iter();
    let mut input = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-li" | "--licenseinfo" => return Ok(Command::License),
            "-tp" | "--thirdparty" => return Ok(Command::ThirdParty),
            "-vi" | "--voxin" => match args.next() {
                Some(path) => input = Some(PathBuf::from(path)),
                None => return Err(format!("{arg} needs a file argument")),
            },
            other => return Err(format!("Unknown argument: {other}")),
        }
    }

    input
        .map(Command::Convert)
        .ok_or_else(|| "Mandatory -vi .vox input missing".to_string())
}

fn validate_input(path: &Path) -> Result<(), String> {
    let is_vox = path.extension().is_some_and(|ext| ext == "vox");
    if !is_vox {
        return Err(format!(
            "Input file must have a .vox extension: {}",
            path.display()
        ));
    }

    if !path.exists() {
        return Err(format!("Input file does not exist: {}", path.display()));
    }

    Ok(())
}

fn log_model(model: &VoxModel) {
    info!("VOX version: {}", model.version);
    match model.size {
        Some(size) => info!("Size: {size} ({} cells)", size.volume()),
        None => info!("Size: not declared"),
    }
    info!("Number of voxels: {}", model.voxel_count());
    info!(
        "Palette: {}",
        if model.explicit_palette {
            "from file"
        } else {
            "default"
        }
    );

    for material in &model.materials {
        info!("Material {} ({:?})", material.id, material.kind());
        for (key, value) in material.typed_properties() {
            info!("  {key}: {value}");
        }
    }

    let mut census: Vec<(ChunkTag, usize)> = model
        .census
        .iter()
        .map(|(tag, count)| (*tag, *count))
        .collect();
    census.sort();
    for (tag, count) in census {
        info!("Chunk {tag}: {count}");
    }

    info!("Extent: {}", model.extent);
}

fn print_plan(plan: &ScenePlan) {
    println!("materials: {}", plan.materials.len());
    for material in &plan.materials {
        let [r, g, b, a] = material.color;
        println!(
            "  voxMat{}: rgba({r:.3}, {g:.3}, {b:.3}, {a:.3}){}",
            material.index,
            if material.source.is_some() {
                " +MATL"
            } else {
                ""
            }
        );
    }

    println!("instances: {}", plan.instances.len());

    match plan.camera {
        Some(framing) => {
            let CameraFraming { target, radius } = framing;
            let eye = framing.eye(CAMERA_DIRECTION, CAMERA_DISTANCE);
            println!(
                "camera: target ({:.2}, {:.2}, {:.2}), radius {radius:.2}",
                target.x, target.y, target.z
            );
            println!("  eye ({:.2}, {:.2}, {:.2})", eye.x, eye.y, eye.z);
        }
        None => println!("camera: no voxels to frame"),
    }
}

fn convert(path: &Path) -> Result<(), String> {
    validate_input(path)?;

    let model = import_model_from_vox(&path).map_err(|err| err.to_string())?;
    log_model(&model);

    let plan = ScenePlan::from_model(&model);
    print_plan(&plan);

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(message) => {
            error!("{message}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match command {
        Command::Help => println!("{USAGE}"),
        Command::Version => println!("vox-scene {}", env!("CARGO_PKG_VERSION")),
        Command::License => println!("{LICENSE}"),
        Command::ThirdParty => println!("{THIRD_PARTY}"),
        Command::Convert(path) => {
            if let Err(message) = convert(&path) {
                error!("{message}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
