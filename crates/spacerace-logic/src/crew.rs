//! Astronaut / cosmonaut crew bookkeeping.
//!
//! A player's roster holds the astronaut pool and, for each manned
//! program, a fixed set of crew slots. A crew is an ordered list of pool
//! indices whose first entry is the commander.

use serde::{Deserialize, Serialize};

use crate::constants::crew::{COMPAT_WRAP, SPECIAL_CREW_BROKEN};

/// Career status of an astronaut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AstronautStatus {
    #[default]
    Active,
    Training,
    Injured,
    Retired,
    Dead,
}

impl AstronautStatus {
    /// Statuses that disqualify an astronaut from flying.
    pub fn grounded(self) -> bool {
        matches!(self, Self::Dead | Self::Retired | Self::Injured)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Astronaut {
    pub name: String,
    pub status: AstronautStatus,
    /// Compatibility score, 1-10.
    pub compat: i16,
    /// How far below `compat` a crewmate may score.
    pub compat_left: i16,
    /// How far above `compat` a crewmate may score.
    pub compat_right: i16,
    /// Non-zero while on a prime crew.
    pub prime: u8,
    /// Moved between programs this turn.
    pub moved: bool,
    pub assign: u8,
    pub old_assign: u8,
    pub crew: u8,
    pub task: u8,
    pub special: u8,
}

/// Game options that affect crew availability.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CrewOptions {
    /// Skip the crew-training wait after moving an astronaut.
    pub no_crew_training: bool,
}

/// One player's astronaut pool and crew assignments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    pub pool: Vec<Astronaut>,
    /// `crews[program][slot]` lists pool indices, commander first.
    pub crews: Vec<Vec<Vec<usize>>>,
}

impl Roster {
    pub fn commander(&self, program: usize, slot: usize) -> Option<&Astronaut> {
        let index = *self.crews.get(program)?.get(slot)?.first()?;
        self.pool.get(index)
    }
}

/// Does `ast` work well with `peer`?
///
/// Compatible scores lie within `[compat - left, compat + right]`, with the
/// 1-10 scale wrapping around. The relation is not symmetric.
pub fn compatible(ast: &Astronaut, peer: &Astronaut) -> bool {
    let low = ast.compat - ast.compat_left;
    let high = ast.compat + ast.compat_right;
    [peer.compat, peer.compat + COMPAT_WRAP, peer.compat - COMPAT_WRAP]
        .iter()
        .any(|c| (low..=high).contains(c))
}

/// Count the crews of `program` that can be assigned to a mission.
pub fn available_crews_count(roster: &Roster, program: usize, options: CrewOptions) -> usize {
    let Some(slots) = roster.crews.get(program) else {
        return 0;
    };
    (0..slots.len())
        .filter_map(|slot| roster.commander(program, slot))
        .filter(|cmd| cmd.prime == 0 && (options.no_crew_training || !cmd.moved))
        .count()
}

/// Break up every crew that contains a dead, retired or injured member.
///
/// Returns the number of crews broken.
pub fn check_flight_crews(roster: &mut Roster) -> usize {
    let mut broken = 0;

    for program in roster.crews.iter_mut() {
        for members in program.iter_mut() {
            let grounded = members
                .iter()
                .any(|&i| roster.pool.get(i).is_some_and(|a| a.status.grounded()));
            if !grounded {
                continue;
            }

            for &i in members.iter() {
                if let Some(a) = roster.pool.get_mut(i) {
                    a.old_assign = a.assign;
                    a.assign = 0;
                    a.crew = 0;
                    a.prime = 0;
                    a.task = 0;
                    a.moved = false;
                    if a.special == 0 {
                        a.special = SPECIAL_CREW_BROKEN;
                    }
                }
            }
            members.clear();
            broken += 1;
        }
    }

    if broken > 0 {
        log::debug!("Broke up {} flight crews", broken);
    }
    broken
}

#[cfg(test)]
mod tests {
    use super::*;

    fn astro(compat: i16, left: i16, right: i16) -> Astronaut {
        Astronaut {
            compat,
            compat_left: left,
            compat_right: right,
            ..Default::default()
        }
    }

    #[test]
    fn test_compatible_window() {
        let a = astro(5, 1, 2);
        assert!(compatible(&a, &astro(4, 0, 0)));
        assert!(compatible(&a, &astro(7, 0, 0)));
        assert!(!compatible(&a, &astro(8, 0, 0)));
        assert!(!compatible(&a, &astro(3, 0, 0)));
    }

    #[test]
    fn test_compatible_wraps() {
        let a = astro(1, 2, 0);
        // 10 - 10 = 0 and 9 - 10 = -1 both fall in [-1, 1]
        assert!(compatible(&a, &astro(10, 0, 0)));
        assert!(compatible(&a, &astro(9, 0, 0)));
        assert!(!compatible(&a, &astro(8, 0, 0)));
    }

    #[test]
    fn test_compatible_not_symmetric() {
        let picky = astro(5, 0, 0);
        let easy = astro(6, 3, 3);
        assert!(compatible(&easy, &picky));
        assert!(!compatible(&picky, &easy));
    }

    fn roster() -> Roster {
        let mut pool = vec![Astronaut::default(); 6];
        pool[2].prime = 1;
        pool[4].moved = true;
        Roster {
            pool,
            crews: vec![vec![vec![0, 1], vec![2, 3], vec![4, 5], vec![]]],
        }
    }

    #[test]
    fn test_available_crews() {
        let r = roster();
        assert_eq!(available_crews_count(&r, 0, CrewOptions::default()), 1);
        let opts = CrewOptions {
            no_crew_training: true,
        };
        assert_eq!(available_crews_count(&r, 0, opts), 2);
        assert_eq!(available_crews_count(&r, 7, opts), 0);
    }

    #[test]
    fn test_check_flight_crews_breaks_grounded() {
        let mut r = roster();
        r.pool[1].status = AstronautStatus::Injured;
        r.pool[0].assign = 3;
        r.pool[1].special = 2;
        r.pool[0].task = 4;

        assert_eq!(check_flight_crews(&mut r), 1);
        assert!(r.crews[0][0].is_empty());
        assert_eq!(r.crews[0][1], vec![2, 3]);
        assert_eq!(r.pool[0].old_assign, 3);
        assert_eq!(r.pool[0].assign, 0);
        assert_eq!(r.pool[0].task, 0);
        assert_eq!(r.pool[0].special, SPECIAL_CREW_BROKEN);
        assert_eq!(r.pool[1].special, 2);
    }

    #[test]
    fn test_check_flight_crews_leaves_healthy_crews() {
        let mut r = roster();
        assert_eq!(check_flight_crews(&mut r), 0);
        assert_eq!(r.crews[0][2], vec![4, 5]);
        assert!(r.pool[4].moved);
    }
}
