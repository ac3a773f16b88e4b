use console::Style;
use glimpse_core::asset::VideoAsset;
use glimpse_core::config::DirectorConfig;
use glimpse_core::pipeline::DirectorOutput;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().white(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_direct_summary(asset: &VideoAsset, config: &DirectorConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Glimpse Director"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(16)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(asset.path.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Source"),
        s.value
            .apply_to(format!("{}x{} @ {:.2} fps", asset.width, asset.height, asset.fps))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Glimpse"),
        s.value
            .apply_to(format!("{}x{}", config.glimpse_width, config.glimpse_height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Segments"),
        s.value.apply_to(format!("{}s each", config.split_length_secs))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Directions"),
        s.value.apply_to(format!(
            "{} tilt x {} pan",
            config.grid.phi_count(),
            config.grid.lambda_count()
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Smoothness"),
        s.value.apply_to(config.smoothness_weight)
    );
    println!();
}

pub fn print_path_summary(result: &DirectorOutput, config: &DirectorConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Chosen path"));
    println!("    {:>7}  {:>6}  {:>6}", "Segment", "Tilt", "Pan");
    for (i, waypoint) in result.path.iter().enumerate() {
        println!(
            "    {:>7}  {:>5}\u{00b0}  {:>5}\u{00b0}",
            i,
            config.grid.phi(waypoint.phi),
            config.grid.lambda(waypoint.lambda)
        );
    }

    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(result.output.path.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(result.output.frame_count)
    );
    println!();
}
