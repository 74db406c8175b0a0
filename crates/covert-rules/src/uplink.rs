//! Uplink provisioning.
//!
//! Finds the carrier device for an allegiance, installs a store holding the
//! job-adjusted starting balance and returns the device's unlock code.
//! Corporate headsets also receive a codeword listener.

use rand::Rng;
use tracing::{debug, warn};

use covert_types::{
    Allegiance, CarrierKind, Currency, DeviceId, EmploymentRole, EntityId, MindId, UplinkCode,
};

use crate::error::ProvisionError;
use crate::services::{CarrierDiscovery, JobLookup, UplinkInstaller};

/// The device kind each allegiance's uplink lives on.
pub const fn carrier_for(allegiance: Allegiance) -> CarrierKind {
    match allegiance {
        Allegiance::Syndicate => CarrierKind::Pda,
        Allegiance::Corporate => CarrierKind::Headset,
    }
}

/// The currency each allegiance's uplink holds.
pub const fn currency_for(allegiance: Allegiance) -> Currency {
    match allegiance {
        Allegiance::Syndicate => Currency::Telecrystal,
        Allegiance::Corporate => Currency::BluespaceCrystal,
    }
}

/// Starting balance after the job's antagonist advantage, floored at zero.
pub fn starting_balance(base: u32, job: Option<&EmploymentRole>) -> u32 {
    job.map_or(base, |j| base.saturating_sub(j.antag_advantage))
}

/// Everything [`provision`] needs to know about the new traitor.
#[derive(Debug, Clone, Copy)]
pub struct ProvisionRequest<'a> {
    /// The participant's body.
    pub entity: EntityId,
    /// The participant's mind (used for the job lookup).
    pub mind: MindId,
    /// Which allegiance the uplink serves.
    pub allegiance: Allegiance,
    /// Balance before the job penalty.
    pub base_balance: u32,
    /// Notes in a freshly generated unlock code.
    pub code_length: usize,
    /// The allegiance's codewords, for the Corporate listener.
    pub codewords: &'a [String],
}

/// A successfully installed uplink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedUplink {
    /// The carrier device.
    pub device: DeviceId,
    /// Currency of the store.
    pub currency: Currency,
    /// Balance after the job penalty.
    pub balance: u32,
    /// The device's unlock code.
    pub code: UplinkCode,
}

/// Install an uplink for `request`.
///
/// # Errors
///
/// Returns [`ProvisionError::NoCarrierFound`] if the participant wears no
/// suitable device, or [`ProvisionError::ProvisionFailed`] if the device
/// rejects the store or cannot produce an unlock code.
pub fn provision<S, R>(
    services: &mut S,
    request: &ProvisionRequest<'_>,
    rng: &mut R,
) -> Result<ProvisionedUplink, ProvisionError>
where
    S: JobLookup + CarrierDiscovery + UplinkInstaller + ?Sized,
    R: Rng + ?Sized,
{
    let entity = request.entity;
    let job = services.mind_job(request.mind);
    let balance = starting_balance(request.base_balance, job.as_ref());

    let kind = carrier_for(request.allegiance);
    let device = services
        .find_carrier(entity, kind)
        .ok_or(ProvisionError::NoCarrierFound { entity, kind })?;

    // No store is installed unless the unlock code resolved.
    let code = services
        .ensure_unlock_code(device, request.code_length, rng)
        .ok_or(ProvisionError::ProvisionFailed {
            entity,
            device,
            reason: "unlock code unavailable",
        })?;

    let currency = currency_for(request.allegiance);
    if !services.install_uplink(entity, device, currency, balance) {
        return Err(ProvisionError::ProvisionFailed {
            entity,
            device,
            reason: "uplink rejected",
        });
    }

    if request.allegiance == Allegiance::Corporate
        && !services.install_listener(device, request.codewords.to_vec())
    {
        warn!(entity = %entity, device = %device, "headset refused codeword listener");
    }

    debug!(
        entity = %entity,
        device = %device,
        currency = %currency,
        balance,
        "uplink provisioned"
    );

    Ok(ProvisionedUplink {
        device,
        currency,
        balance,
        code,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use covert_station::{Device, Station};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn job(antag_advantage: u32) -> EmploymentRole {
        EmploymentRole {
            name: String::from("Captain"),
            antag_advantage,
        }
    }

    fn request(entity: EntityId, mind: MindId, allegiance: Allegiance) -> ProvisionRequest<'static> {
        ProvisionRequest {
            entity,
            mind,
            allegiance,
            base_balance: 20,
            code_length: 6,
            codewords: &[],
        }
    }

    #[test]
    fn job_penalty_reduces_balance() {
        assert_eq!(starting_balance(20, Some(&job(5))), 15);
    }

    #[test]
    fn job_penalty_floors_at_zero() {
        assert_eq!(starting_balance(20, Some(&job(25))), 0);
    }

    #[test]
    fn no_job_keeps_base_balance() {
        assert_eq!(starting_balance(20, None), 20);
    }

    #[test]
    fn syndicate_uplink_lands_on_pda() {
        let mut station = Station::new();
        let (entity, mind) = station.spawn_crew("Alice", Some(job(5)), []);
        let pda = station.equip(entity, CarrierKind::Pda).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);

        let uplink =
            provision(&mut station, &request(entity, mind, Allegiance::Syndicate), &mut rng)
                .unwrap();

        assert_eq!(uplink.device, pda);
        assert_eq!(uplink.currency, Currency::Telecrystal);
        assert_eq!(uplink.balance, 15);
        assert_eq!(uplink.code.len(), 6);
        assert!(station.device(pda).is_some_and(Device::is_provisioned));
    }

    #[test]
    fn corporate_uplink_lands_on_headset_with_listener() {
        let mut station = Station::new();
        let (entity, mind) = station.spawn_crew("Bob", None, []);
        station.equip(entity, CarrierKind::Pda).unwrap();
        let headset = station.equip(entity, CarrierKind::Headset).unwrap();
        let codewords = vec![String::from("Amber"), String::from("Drift")];
        let mut rng = SmallRng::seed_from_u64(2);

        let req = ProvisionRequest {
            codewords: &codewords,
            ..request(entity, mind, Allegiance::Corporate)
        };
        let uplink = provision(&mut station, &req, &mut rng).unwrap();

        assert_eq!(uplink.device, headset);
        assert_eq!(uplink.currency, Currency::BluespaceCrystal);
        assert_eq!(
            station
                .device(headset)
                .and_then(|d| d.listener.as_ref())
                .map(|l| l.codewords.clone()),
            Some(codewords)
        );
    }

    #[test]
    fn missing_carrier_is_reported() {
        let mut station = Station::new();
        let (entity, mind) = station.spawn_crew("Carol", None, []);
        station.equip(entity, CarrierKind::Pda).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);

        assert_eq!(
            provision(&mut station, &request(entity, mind, Allegiance::Corporate), &mut rng),
            Err(ProvisionError::NoCarrierFound {
                entity,
                kind: CarrierKind::Headset
            })
        );
    }

    #[test]
    fn second_provision_on_same_device_fails() {
        let mut station = Station::new();
        let (entity, mind) = station.spawn_crew("Dave", None, []);
        let pda = station.equip(entity, CarrierKind::Pda).unwrap();
        let mut rng = SmallRng::seed_from_u64(4);
        let req = request(entity, mind, Allegiance::Syndicate);

        assert!(provision(&mut station, &req, &mut rng).is_ok());
        assert!(matches!(
            provision(&mut station, &req, &mut rng),
            Err(ProvisionError::ProvisionFailed { device, .. }) if device == pda
        ));
    }
}
