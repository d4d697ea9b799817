use clap::Parser;

#[derive(Parser, Clone)]
#[command(name = "desksnow")]
#[command(about = "Transparent click-through snowfall overlay for Wayland/Hyprland")]
pub struct Args {
    /// Number of snowflakes (1-1000)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=1000))]
    pub count: Option<u16>,

    /// Minimum fall speed in pixels/tick
    #[arg(long)]
    pub speed_min: Option<f32>,

    /// Maximum fall speed in pixels/tick
    #[arg(long)]
    pub speed_max: Option<f32>,

    /// Maximum horizontal wind bias in pixels/tick
    #[arg(long)]
    pub wind: Option<f32>,

    /// Start with the overlay hidden; show it later via the config file
    #[arg(long)]
    pub hidden: bool,
}
