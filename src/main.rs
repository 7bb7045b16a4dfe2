//=========================================================================
// The Last Stop — Host Binary
//
// Installs logging and runs the narrative until the window closes.
// Set `RUST_LOG=debug` to follow phase changes and hand-offs.
//
//=========================================================================

use last_stop::scenes::SceneKind;
use last_stop::EngineBuilder;

fn main() {
    env_logger::init();

    EngineBuilder::<SceneKind>::new()
        .with_title("The Last Stop: Ocean")
        .build()
        .run();
}
