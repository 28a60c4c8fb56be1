//! # Body Registry
//!
//! Static descriptors for the sun, the nine orbiting bodies and the drifting
//! near-earth objects. Everything the scene graph builder instantiates at
//! startup comes from the tables in this module.

use rand::Rng;

/// Texture used for all six faces of the starfield cube map
pub const STARFIELD_TEXTURE: &str = "stars.jpg";

/// Texture shared by every near-earth object
pub const ASTEROID_TEXTURE: &str = "asteroid.jpeg";

/// Sphere tessellation used for the sun and planets (width, height segments)
pub const BODY_SEGMENTS: (u32, u32) = (30, 30);

/// Sphere tessellation used for near-earth objects
pub const FREE_OBJECT_SEGMENTS: (u32, u32) = (20, 20);

/// Angular segments of a ring mesh
pub const RING_SEGMENTS: u32 = 32;

/// Whether a body emits light or is lit by the sun
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Self-lit, rendered unshaded and never a hover target
    Star,
    /// Lit by the point light at the origin, hoverable
    Planet,
}

/// Flat ring around a body, lying in the orbital plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingDescriptor {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub texture: &'static str,
}

/// Static description of a celestial body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDescriptor {
    pub name: &'static str,
    pub kind: BodyKind,
    /// Sphere radius in world units
    pub radius: f32,
    pub texture: &'static str,
    /// Offset of the mesh from its pivot along the x axis
    pub orbit_radius: f32,
    pub ring: Option<RingDescriptor>,
    /// Self-rotation increment per frame, in radians
    pub spin_rate: f32,
    /// Pivot rotation increment per frame, in radians
    pub revolve_rate: f32,
    pub description: Option<&'static str>,
}

/// Half-open speed interval `[min, min + span)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedRange {
    pub min: f32,
    pub span: f32,
}

impl SpeedRange {
    pub const fn new(min: f32, span: f32) -> Self {
        Self { min, span }
    }

    /// Draws a speed from the range. Always strictly positive for ranges with `min > 0`.
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        self.min + rng.random::<f32>() * self.span
    }

    pub fn contains(&self, speed: f32) -> bool {
        speed >= self.min && speed <= self.min + self.span
    }
}

/// Static description of a near-earth object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeObjectDescriptor {
    pub name: &'static str,
    pub radius: f32,
    pub texture: &'static str,
    pub position: [f32; 3],
    /// Range the initial speed is drawn from
    pub speed: SpeedRange,
    pub description: &'static str,
}

pub const SUN: BodyDescriptor = BodyDescriptor {
    name: "Sun",
    kind: BodyKind::Star,
    radius: 16.0,
    texture: "sun.jpg",
    orbit_radius: 0.0,
    ring: None,
    spin_rate: 0.004,
    revolve_rate: 0.0,
    description: None,
};

/// Orbiting bodies in ascending orbital-radius order
pub const PLANETS: [BodyDescriptor; 9] = [
    BodyDescriptor {
        name: "Mercury",
        kind: BodyKind::Planet,
        radius: 3.2,
        texture: "mercury.jpg",
        orbit_radius: 28.0,
        ring: None,
        spin_rate: 0.004,
        revolve_rate: 0.04,
        description: Some("Mercury: \n- Location: Closest planet to the Sun. \n- Composition: Primarily made of iron and rocks.\n- Diameter: Approximately 4,880 kilometers.\n- Surface: No thick atmosphere, leading to temperatures ranging from \n-173 to 427 degrees Celsius.\n- Life: No known life.\n- Rotation: Rotates on its axis every 59 days.\n- Orbit: Completes an orbit around the Sun every 88 days.\n- Moons: Has no moons."),
    },
    BodyDescriptor {
        name: "Venus",
        kind: BodyKind::Planet,
        radius: 5.8,
        texture: "venus.jpg",
        orbit_radius: 44.0,
        ring: None,
        spin_rate: 0.002,
        revolve_rate: 0.015,
        description: Some("Venus: \n- Location: Second planet from the Sun.\n- Composition: Made of rocks and minerals, similar in composition to Earth.\n- Diameter: Approximately 12,104 kilometers.\n- Atmosphere: Dense atmosphere mainly composed of carbon dioxide.\n- Temperature: Reaches up to 465 degrees Celsius.\n- Life: No known life.\n- Rotation: Rotates on its axis every 243 days in a retrograde direction.\n- Orbit: Completes an orbit around the Sun every 225 days.\n- Moons: Has no moons."),
    },
    BodyDescriptor {
        name: "Earth",
        kind: BodyKind::Planet,
        radius: 6.0,
        texture: "earth.jpg",
        orbit_radius: 62.0,
        ring: None,
        spin_rate: 0.02,
        revolve_rate: 0.01,
        description: Some("Earth: \n- Location: Third planet from the Sun.\n- Composition: Consists of crust, mantle, and core.\n- Diameter: Approximately 12,742 kilometers.\n- Surface: 71% covered by water.\n- Life: Supports abundant life.\n- Rotation: Rotates on its axis every 24 hours.\n- Orbit: Completes an orbit around the Sun every 365.25 days.\n- Moons: Has one moon."),
    },
    BodyDescriptor {
        name: "Mars",
        kind: BodyKind::Planet,
        radius: 4.0,
        texture: "mars.jpg",
        orbit_radius: 78.0,
        ring: None,
        spin_rate: 0.018,
        revolve_rate: 0.008,
        description: Some("Mars: \n- Location: Fourth planet from the Sun.\n- Composition: Made of rocks and minerals, with a thin atmosphere.\n- Diameter: Approximately 6,779 kilometers.\n- Surface: Atmosphere primarily composed of carbon dioxide.\n- Temperature: Ranges from -125 to 20 degrees Celsius.\n- Life: No known life, but interest in past water presence.\n- Rotation: Rotates on its axis every 24.6 hours.\n- Orbit: Completes an orbit around the Sun every 687 days.\n- Moons: Has two small moons: Phobos and Deimos."),
    },
    BodyDescriptor {
        name: "Jupiter",
        kind: BodyKind::Planet,
        radius: 12.0,
        texture: "jupiter.jpg",
        orbit_radius: 100.0,
        ring: None,
        spin_rate: 0.04,
        revolve_rate: 0.002,
        description: Some("Jupiter: \n- Location: Fifth planet from the Sun.\n- Composition: Gas giant primarily composed of hydrogen and helium.\n- Diameter: Approximately 139,820 kilometers.\n- Surface: No clear solid surface.\n- Temperature: Ranges from -145 degrees Celsius in the upper atmosphere.\n- Life: No known life.\n- Rotation: Rotates on its axis every 9.9 hours.\n- Orbit: Completes an orbit around the Sun every 11.9 years.\n- Moons: Has more than 79 moons, including Ganymede, the largest moon in the solar system."),
    },
    BodyDescriptor {
        name: "Saturn",
        kind: BodyKind::Planet,
        radius: 10.0,
        texture: "saturn.jpg",
        orbit_radius: 138.0,
        ring: Some(RingDescriptor {
            inner_radius: 10.0,
            outer_radius: 20.0,
            texture: "saturn ring.png",
        }),
        spin_rate: 0.038,
        revolve_rate: 0.0009,
        description: Some("Saturn: \n- Location: Sixth planet from the Sun.\n- Composition: Gas giant composed of hydrogen and helium.\n- Diameter: Approximately 116,460 kilometers.\n- Surface: Known for its distinctive rings.\n- Temperature: Around -178 degrees Celsius.\n- Life: No known life.\n- Rotation: Rotates on its axis every 10.7 hours.\n- Orbit: Completes an orbit around the Sun every 29.5 years.\n- Moons: Has more than 80 moons, including Titan."),
    },
    BodyDescriptor {
        name: "Uranus",
        kind: BodyKind::Planet,
        radius: 7.0,
        texture: "uranus.jpg",
        orbit_radius: 176.0,
        ring: Some(RingDescriptor {
            inner_radius: 7.0,
            outer_radius: 12.0,
            texture: "uranus ring.png",
        }),
        spin_rate: 0.03,
        revolve_rate: 0.0004,
        description: Some("Uranus: \n- Location: Seventh planet from the Sun.\n- Composition: Gas giant with a composition rich in methane and ammonia.\n- Diameter: Approximately 50,724 kilometers.\n- Surface: Atmosphere composed of hydrogen, helium, and methane.\n- Temperature: Around -224 degrees Celsius.\n- Life: No known life.\n- Rotation: Rotates on its axis every 17.2 hours.\n- Orbit: Completes an orbit around the Sun every 84 years.\n- Moons: Has 27 moons, including Titania and Oberon."),
    },
    BodyDescriptor {
        name: "Neptune",
        kind: BodyKind::Planet,
        radius: 7.0,
        texture: "neptune.jpg",
        orbit_radius: 200.0,
        ring: None,
        spin_rate: 0.032,
        revolve_rate: 0.0001,
        description: Some("Neptune: \n- Location: Eighth and farthest planet from the Sun.\n- Composition: Gas giant with a composition similar to Uranus.\n- Diameter: Approximately 49,244 kilometers.\n- Surface: Atmosphere rich in methane.\n- Temperature: Around -214 degrees Celsius.\n- Life: No known life.\n- Rotation: Rotates on its axis every 16 hours.\n- Orbit: Completes an orbit around the Sun every 165 years.\n- Moons: Has 14 moons, including Triton."),
    },
    BodyDescriptor {
        name: "Pluto",
        kind: BodyKind::Planet,
        radius: 2.8,
        texture: "pluto.jpg",
        orbit_radius: 216.0,
        ring: None,
        spin_rate: 0.008,
        revolve_rate: 0.00007,
        description: Some("Pluto: \n- Location: Located in the Kuiper Belt.\n- Composition: Primarily rock and ice, with a thin nitrogen, methane, and carbon monoxide atmosphere.\n- Diameter: Approximately 2,377 kilometers.\n- Surface: Varied terrain with icy mountains and plains, reddish tint from tholins.\n- Temperature: Average surface temperature around -229 degrees Celsius.\n- Life: No known life.\n- Rotation: Rotates on its axis once every 6.4 Earth days.\n- Orbit: Highly elliptical orbit taking 248 Earth years to complete.\n- Moons: Has five known moons, including Charon."),
    },
];

const fn neo(
    name: &'static str,
    radius: f32,
    position: [f32; 3],
    speed: SpeedRange,
) -> FreeObjectDescriptor {
    FreeObjectDescriptor {
        name,
        radius,
        texture: ASTEROID_TEXTURE,
        position,
        speed,
        description: name,
    }
}

/// Near-earth objects, in three waves of three
pub const FREE_OBJECTS: [FreeObjectDescriptor; 9] = [
    neo("NEO 1", 2.0, [80.0, 10.0, 0.0], SpeedRange::new(1.0, 2.0)),
    neo("NEO 2", 2.5, [90.0, 5.0, -20.0], SpeedRange::new(0.1, 0.5)),
    neo("NEO 3", 1.5, [70.0, 15.0, 10.0], SpeedRange::new(0.01, 0.06)),
    neo("NEO 1", 2.0, [20.0, 10.0, 0.0], SpeedRange::new(3.0, 5.0)),
    neo("NEO 2", 2.5, [90.0, 10.0, -10.0], SpeedRange::new(0.3, 0.5)),
    neo("NEO 3", 1.5, [70.0, 15.0, 50.0], SpeedRange::new(0.07, 0.05)),
    neo("NEO 1", 2.0, [9.0, 5.0, 0.0], SpeedRange::new(1.0, 8.0)),
    neo("NEO 2", 2.5, [90.0, 5.0, -10.0], SpeedRange::new(0.1, 0.8)),
    neo("NEO 3", 1.5, [50.0, 15.0, 10.0], SpeedRange::new(0.01, 0.08)),
];

/// Every body in animation order: the sun, then planets by ascending orbital radius
pub fn bodies() -> impl Iterator<Item = &'static BodyDescriptor> {
    std::iter::once(&SUN).chain(PLANETS.iter())
}

/// Unique texture file names referenced by the registry, starfield first
pub fn texture_names() -> Vec<&'static str> {
    let mut names = vec![STARFIELD_TEXTURE];
    let body_textures = bodies().flat_map(|body| {
        std::iter::once(body.texture).chain(body.ring.map(|ring| ring.texture))
    });
    let free_textures = FREE_OBJECTS.iter().map(|object| object.texture);

    for name in body_textures.chain(free_textures) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_planets_sorted_by_orbit_radius() {
        let radii: Vec<f32> = bodies().map(|b| b.orbit_radius).collect();
        assert!(radii.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(bodies().count(), 10);
    }

    #[test]
    fn test_only_planets_carry_descriptions() {
        assert!(SUN.description.is_none());
        assert!(PLANETS
            .iter()
            .all(|p| p.kind == BodyKind::Planet && p.description.is_some()));
        let earth = PLANETS.iter().find(|p| p.name == "Earth").unwrap();
        assert!(earth.description.unwrap().starts_with("Earth: \n- Location"));
    }

    #[test]
    fn test_rings_configured_for_saturn_and_uranus() {
        let ringed: Vec<&str> = PLANETS
            .iter()
            .filter(|p| p.ring.is_some())
            .map(|p| p.name)
            .collect();
        assert_eq!(ringed, vec!["Saturn", "Uranus"]);
    }

    #[test]
    fn test_texture_names_unique() {
        let names = texture_names();
        // stars + sun + 9 planets + 2 rings + asteroid
        assert_eq!(names.len(), 14);
        assert_eq!(names[0], STARFIELD_TEXTURE);
        assert_eq!(
            names.iter().filter(|n| **n == ASTEROID_TEXTURE).count(),
            1
        );
    }

    #[test]
    fn test_speed_range_sampling() {
        let mut rng = StdRng::seed_from_u64(7);
        for descriptor in FREE_OBJECTS.iter() {
            for _ in 0..100 {
                let speed = descriptor.speed.sample(&mut rng);
                assert!(speed > 0.0);
                assert!(descriptor.speed.contains(speed));
            }
        }
    }
}
