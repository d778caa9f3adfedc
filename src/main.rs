use farmstead::{config::ViewerConfig, flow, scene::Farmstead};

fn main() -> anyhow::Result<()> {
    let config = ViewerConfig::from_env()?;
    flow::run::<()>(config, vec![Farmstead::constructor()])
}
