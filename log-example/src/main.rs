use microlog::{Feature, Level, info, debug, trace, error};

fn main() {
    microlog::init();
    println!("output level: {}", microlog::output_level());

    microlog::set_output_level(Level::Trace);
    microlog::enable_feature(Feature::Time);

    // four messages in different colors
    info!("This is an info-level message, used for general communication");
    debug!("This is a debug message, used to add detail");
    trace!("This is a trace message, used for providing granular context");
    error!("This is an error message, for when things go wrong");

    microlog::disable_feature(Feature::Color);
    trace!("This is also a trace message, but should have no color");

    microlog::set_output_level(Level::Debug);
    trace!("This trace message should be hidden");
}
