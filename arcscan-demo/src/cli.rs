use anyhow::{Context, Result, bail};
use arcscan::math::{Pose, Vec3};
use arcscan::scene::{Obstacle, StaticScene};
use arcscan::{ArcScanDesc, ArcScanner, ScanRequest};

const USAGE: &str = "usage: arcscan-demo [samples] [angle_degrees] [max_distance]";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    pub samples: usize,
    pub angle_degrees: f32,
    pub max_distance: f32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            samples: 9,
            angle_degrees: 180.0,
            max_distance: 20.0,
        }
    }
}

impl Options {
    /// Positional arguments, each optional, in the order of `USAGE`.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter();

        if let Some(arg) = args.next() {
            if arg == "-h" || arg == "--help" {
                bail!(USAGE);
            }
            options.samples = arg
                .parse()
                .with_context(|| format!("invalid sample count '{}'\n{}", arg, USAGE))?;
        }
        if let Some(arg) = args.next() {
            options.angle_degrees = arg
                .parse()
                .with_context(|| format!("invalid angle '{}'\n{}", arg, USAGE))?;
        }
        if let Some(arg) = args.next() {
            options.max_distance = arg
                .parse()
                .with_context(|| format!("invalid max distance '{}'\n{}", arg, USAGE))?;
        }
        if args.next().is_some() {
            bail!("too many arguments\n{}", USAGE);
        }

        Ok(options)
    }
}

/// A 20 x 20 room with a pillar and a trigger volume in front of the agent.
fn build_room() -> StaticScene {
    let mut scene = StaticScene::new();
    scene
        .add_plane(Vec3::new(0.0, 0.0, -10.0), Vec3::Z)
        .add_plane(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z)
        .add_plane(Vec3::new(-10.0, 0.0, 0.0), Vec3::X)
        .add_plane(Vec3::new(10.0, 0.0, 0.0), Vec3::NEG_X)
        .add_sphere(Vec3::new(-2.5, 0.0, -4.0), 1.0)
        .add(Obstacle::sphere(Vec3::new(2.0, 0.0, -2.0), 0.5).as_trigger());
    scene
}

pub fn run(options: &Options) -> Result<()> {
    let scene = build_room();
    let scanner = ArcScanner::new(ArcScanDesc::default())?;

    log::info!("=== Single arc scan ===");
    let agent = Pose::looking_along(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z);
    let request = ScanRequest::from_pose(&agent)
        .with_samples(options.samples)
        .with_angle(options.angle_degrees)
        .with_max_distance(options.max_distance);

    let result = scanner.scan(&request, &scene);
    let positions = scanner.positions(&request, result.as_slice());
    for (index, (hit, position)) in result.iter().zip(&positions).enumerate() {
        match hit {
            Some(hit) => log::info!(
                "sample {:>3}: hit  at {:>6.2} m -> {:?}",
                index,
                hit.distance,
                position
            ),
            None => log::info!("sample {:>3}: miss         -> {:?}", index, position),
        }
    }
    log::info!(
        "{} of {} samples hit",
        result.hit_count(),
        result.len()
    );
    if let Some((index, nearest)) = result.nearest() {
        log::info!(
            "nearest obstacle: sample {} at {:.2} m",
            index,
            nearest.distance
        );
    }

    log::info!("=== Batch of 360 degree scans ===");
    let agents: Vec<ScanRequest> = (0..6)
        .map(|i| {
            let x = -7.5 + 3.0 * i as f32;
            ScanRequest::new(Vec3::new(x, 0.0, 5.0), Vec3::NEG_Z)
                .with_samples(16)
                .with_angle(360.0)
                .with_max_distance(options.max_distance)
                .with_sphere_radius(0.3)
        })
        .collect();

    let workers = std::thread::available_parallelism().map_or(1, |n| n.get());
    let results = scanner.scan_batch(&agents, &scene, workers)?;
    for (request, result) in agents.iter().zip(&results) {
        let closest = result
            .nearest()
            .map(|(_, hit)| format!("{:.2} m", hit.distance))
            .unwrap_or_else(|| "none".to_string());
        log::info!(
            "agent at {:?}: {}/{} hits, closest {}",
            request.origin,
            result.hit_count(),
            result.len(),
            closest
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(Options::parse(args(&[])).unwrap(), Options::default());
    }

    #[test]
    fn test_parse_positional() {
        let options = Options::parse(args(&["5", "90", "12.5"])).unwrap();
        assert_eq!(options.samples, 5);
        assert_eq!(options.angle_degrees, 90.0);
        assert_eq!(options.max_distance, 12.5);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Options::parse(args(&["many"])).is_err());
        assert!(Options::parse(args(&["3", "90", "1", "extra"])).is_err());
    }

    #[test]
    fn test_run_with_defaults() {
        run(&Options::default()).unwrap();
    }
}
