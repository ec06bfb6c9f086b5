//! Relationship registrar.
//!
//! Once an owning aggregate has been constructed and carries its key, the
//! registrar wires that key into the back-reference collections of the
//! entities it references and applies the availability transition the new
//! relationship causes. Registration is idempotent: wiring the same child
//! twice leaves a single entry.
//!
//! Only assemblers register aggregates. The transient aggregate a service
//! builds before insert has no key yet; it exists to derive row fields and
//! is re-assembled once the store hands back the key.

use super::fine::Fine;
use super::maintenance::MaintenanceRecord;
use super::rental::Rental;
use super::reservation::Reservation;

/// Append when absent. Returns whether the item was added.
pub fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    if items.contains(&item) {
        return false;
    }
    items.push(item);
    true
}

/// Wire a rental into its client, employee and vehicle, then claim the
/// vehicle for it.
pub fn register_rental(rental: &mut Rental) {
    let Some(id) = rental.id else { return };
    push_unique(&mut rental.client.rentals, id);
    push_unique(&mut rental.employee.rentals, id);
    push_unique(&mut rental.vehicle.rentals, id);
    rental.vehicle.rent();
}

/// Wire a reservation into its client and, when one was requested, its
/// vehicle, claiming the vehicle for it.
pub fn register_reservation(reservation: &mut Reservation) {
    let Some(id) = reservation.id else { return };
    push_unique(&mut reservation.client.reservations, id);
    if let Some(vehicle) = reservation.vehicle.as_mut() {
        push_unique(&mut vehicle.reservations, id);
        vehicle.reserve();
    }
}

/// Wire a fine into the rental it was charged against.
pub fn register_fine(fine: &mut Fine) {
    let Some(id) = fine.id else { return };
    push_unique(&mut fine.rental.fines, id);
}

/// Wire a maintenance record into its vehicle. Availability is untouched.
pub fn register_maintenance(record: &mut MaintenanceRecord) {
    let Some(id) = record.id else { return };
    push_unique(&mut record.vehicle.maintenance, id);
}

// ── Tests ──────────────────────────────────────────────────────
