use rand::Rng;

/// One floating particle of the hero background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Diameter in pixels
    pub size: f64,
    /// Horizontal position in percent of the container
    pub x: f64,
    /// Vertical position in percent of the container
    pub y: f64,
    /// Animation period in seconds
    pub duration: f64,
    /// Animation start delay in seconds
    pub delay: f64,
}

impl Particle {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            size: rng.gen_range(1.0..5.0),
            x: rng.gen_range(0.0..100.0),
            y: rng.gen_range(0.0..100.0),
            duration: rng.gen_range(10.0..30.0),
            delay: rng.gen_range(0.0..5.0),
        }
    }

    /// Inline style of the particle element.
    pub fn style(&self) -> String {
        format!(
            "width: {size:.2}px; height: {size:.2}px; left: {x:.2}%; top: {y:.2}%; \
             animation: floatParticle {duration:.2}s {delay:.2}s infinite ease-in-out;",
            size = self.size,
            x = self.x,
            y = self.y,
            duration = self.duration,
            delay = self.delay,
        )
    }
}

pub fn particle_field(count: usize, rng: &mut impl Rng) -> Vec<Particle> {
    (0..count).map(|_| Particle::random(rng)).collect()
}
