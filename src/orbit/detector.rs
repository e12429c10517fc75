use glam::Vec3;

/// One alignment event. Tickets count up from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Firing {
    pub ticket: u32,
}

impl Firing {
    /// Only every second alignment launches a transfer.
    pub fn launches(&self) -> bool {
        self.ticket % 2 == 0
    }
}

/// Angle at `reference` subtended by `origin` and `destination`, in whole
/// degrees (truncated). `None` while two bodies coincide.
pub fn subtended_angle(origin: Vec3, destination: Vec3, reference: Vec3) -> Option<i32> {
    let d_os = origin.distance(reference);
    let d_ds = destination.distance(reference);
    let d_od = origin.distance(destination);

    if d_os == 0.0 || d_ds == 0.0 {
        return None;
    }

    let cosine = (d_os * d_os + d_ds * d_ds - d_od * d_od) / (2.0 * d_os * d_ds);
    // Truncation toward zero, matching an integer cast.
    Some(cosine.clamp(-1.0, 1.0).acos().to_degrees() as i32)
}

/// Edge-triggered match on an exact integer angle. Fires once when the
/// angle lands on the target and re-arms as soon as it leaves it.
#[derive(Debug, Clone)]
pub struct TransferWindowDetector {
    target_angle: i32,
    armed: bool,
    ticket_count: u32,
}

impl TransferWindowDetector {
    pub fn new(target_angle: i32) -> Self {
        Self {
            target_angle,
            armed: true,
            ticket_count: 0,
        }
    }

    pub fn target_angle(&self) -> i32 {
        self.target_angle
    }

    pub fn ticket_count(&self) -> u32 {
        self.ticket_count
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn observe(&mut self, angle: i32) -> Option<Firing> {
        if angle != self.target_angle {
            self.armed = true;
            return None;
        }

        if !self.armed {
            return None;
        }

        self.armed = false;
        self.ticket_count += 1;
        log::debug!("alignment at {angle} degrees, ticket {}", self.ticket_count);

        Some(Firing {
            ticket: self.ticket_count,
        })
    }

    pub fn observe_positions(
        &mut self,
        origin: Vec3,
        destination: Vec3,
        reference: Vec3,
    ) -> Option<Firing> {
        subtended_angle(origin, destination, reference)
            .and_then(|angle| self.observe(angle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn firings(detector: &mut TransferWindowDetector, angles: &[i32]) -> Vec<(usize, Firing)> {
        angles
            .iter()
            .enumerate()
            .filter_map(|(i, &angle)| Some((i, detector.observe(angle)?)))
            .collect()
    }

    #[test]
    fn fires_once_on_first_matching_tick() {
        let mut detector = TransferWindowDetector::new(44);
        let fired = firings(&mut detector, &[40, 42, 44, 44, 46]);

        assert_eq!(fired, vec![(2, Firing { ticket: 1 })]);
        assert_eq!(detector.ticket_count(), 1);
    }

    #[test]
    fn rearms_after_leaving_target() {
        let mut detector = TransferWindowDetector::new(44);
        let fired = firings(&mut detector, &[44, 44, 45, 44, 43, 44]);

        let tickets: Vec<u32> = fired.iter().map(|(_, f)| f.ticket).collect();
        assert_eq!(tickets, vec![1, 2, 3]);
        assert!(!detector.is_armed());
    }

    #[test]
    fn only_even_tickets_launch() {
        assert!(!Firing { ticket: 1 }.launches());
        assert!(Firing { ticket: 2 }.launches());
        assert!(!Firing { ticket: 3 }.launches());
        assert!(Firing { ticket: 4 }.launches());
    }

    #[test]
    fn sweep_fires_once_regardless_of_tick_rate() {
        let mut rng = rand::thread_rng();

        for _ in 0..200 {
            let mut detector = TransferWindowDetector::new(44);
            let step: f32 = rng.gen_range(0.01..1.0);
            let mut angle = 30.0_f32;
            let mut fired = 0;

            while angle < 60.0 {
                if detector.observe(angle as i32).is_some() {
                    fired += 1;
                }
                angle += step;
            }

            assert_eq!(fired, 1, "step {step} fired {fired} times");
        }
    }

    #[test]
    fn law_of_cosines_angle() {
        let sun = Vec3::ZERO;
        let earth = Vec3::new(5.0, 0.0, 0.0);
        let mars = glam::Quat::from_rotation_y(120.5_f32.to_radians()) * Vec3::new(7.5, 0.0, 0.0);
        assert_eq!(subtended_angle(earth, mars, sun), Some(120));

        let rotation = glam::Quat::from_rotation_y(44.6_f32.to_radians());
        let mars = rotation * Vec3::new(7.5, 0.0, 0.0);
        assert_eq!(subtended_angle(earth, mars, sun), Some(44));
    }

    #[test]
    fn coincident_bodies_have_no_angle() {
        assert_eq!(subtended_angle(Vec3::ZERO, Vec3::X, Vec3::ZERO), None);
    }
}
