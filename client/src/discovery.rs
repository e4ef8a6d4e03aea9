use std::rc::Rc;

use gloo_timers::callback::Timeout;

use silvarion_shared::{DiscoverySchedule, discovery::reveal_count};

use crate::map::MapController;

/// Schedules the staggered reveal of every region the elapsed time since the
/// campaign start has earned. Reveals are visual only; nothing here touches
/// persisted progress.
pub fn start(controller: &Rc<MapController>, schedule: &DiscoverySchedule) {
    let order = controller.registry().discovery_order();
    let count = reveal_count(schedule, chrono::Utc::now(), order.len());
    web_sys::console::log_1(
        &format!("Discovery schedule: revealing {count} of {} regions", order.len()).into(),
    );
    for (index, region_id) in order.iter().take(count).copied().enumerate() {
        let delay_ms = schedule.initial_delay_ms + index as u32 * schedule.discovery_delay_ms;
        let controller = Rc::clone(controller);
        Timeout::new(delay_ms, move || controller.reveal_region(region_id)).forget();
    }
}
