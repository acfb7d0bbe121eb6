use viewer::render;
use viewer::runtime::boot;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    boot::init_logging();
    let (session, prefs, _config) = boot::boot(std::env::args().nth(1))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render::print_page(&session, &prefs, &mut out)?;
    Ok(())
}
