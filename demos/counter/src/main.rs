//! Minimal host loop: one observed counter, printed on each rebuild.

use attune_core::{Scheduler, value};
use attune_ui::{Group, Observe, Text};

fn main() {
    env_logger::init();

    let count = value(0u32);
    let mut host = Scheduler::new();
    let mut build = {
        let count = count.clone();
        move || {
            Observe(&count, None, |n, _| {
                Group(vec![Text("count:"), Text(n.to_string())])
            })
        }
    };

    let view = host.mount(&mut build);
    println!("{}", view.text_content());

    for _ in 0..3 {
        count.update(|n| *n += 1);
        if let Some(view) = host.tick(&mut build) {
            println!("{}", view.text_content());
        }
    }

    log::info!("listeners before unmount: {}", count.listener_count());
    host.unmount();
    log::info!("listeners after unmount: {}", count.listener_count());
}
