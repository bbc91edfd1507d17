use std::path::Path;

use console::Style;
use cropper_core::cropper::Cropper;
use cropper_core::surface::RenderSurface;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    path: Style,
    dim: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            path: Style::new().underlined(),
            dim: Style::new().dim().yellow(),
        }
    }
}

pub fn print_cropper_summary<S: RenderSurface>(file: &Path, cropper: &Cropper<S>) {
    let s = Styles::new();
    let engine = cropper.engine();
    let slider = cropper.slider();

    println!();
    println!("  {}", s.title.apply_to("Cropper"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(16)));
    println!();

    println!("  {:<14}{}", s.label.apply_to("Image"), s.path.apply_to(file.display()));
    if let Some(image) = engine.image() {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Dimensions"),
            s.value.apply_to(format!("{}x{}", image.width, image.height))
        );
    }

    let container = engine.container();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Container"),
        s.value.apply_to(format!("{}x{}", container.width, container.height))
    );
    let viewport = engine.viewport();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Crop box"),
        s.value.apply_to(format!("{}x{}", viewport.width(), viewport.height()))
    );

    match slider.bounds() {
        Some(bounds) => {
            println!(
                "  {:<14}{}",
                s.label.apply_to("Zoom range"),
                s.value.apply_to(format!("{:.3} .. {:.3}", bounds.lower, bounds.upper))
            );
            println!(
                "  {:<14}{}",
                s.label.apply_to("Step"),
                s.value.apply_to(format!("{:.5} / px", slider.step()))
            );
        }
        None => println!("  {:<14}{}", s.label.apply_to("Zoom range"), s.dim.apply_to("not configured")),
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Slider dot"),
        s.value.apply_to(format!("{:.1} / {:.1}", slider.position(), slider.max_position()))
    );

    let pan = engine.pan();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Scale"),
        s.value.apply_to(format!("{:.3}", engine.scale()))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Pan"),
        s.value.apply_to(format!("{:.1}, {:.1}", pan.left, pan.top))
    );
    println!();
}
