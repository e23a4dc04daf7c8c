//! The attractor registry: a closed set of chaotic-system derivative functions.
//!
//! Each variant is a system of three coupled ordinary differential equations
//! whose trajectories settle onto a bounded fractal structure (the "strange
//! attractor"). The classic example is the Lorenz system:
//!
//!   dx/dt = σ(y - x)
//!   dy/dt = x(ρ - z) - y
//!   dz/dt = xy - βz
//!
//! Coefficients are design constants baked into each variant, not
//! configuration: a tag fully determines the derivative function. Adding a
//! variant means adding an enum arm, a `delta` arm and a `wgsl_body` arm;
//! nothing else in the crate changes.
//!
//! The same derivative definition is used on both sides of the engine: the CPU
//! integrator calls [`Attractor::delta`] and the FBO simulation pass embeds
//! the WGSL emitted by [`Attractor::wgsl_delta_fn`].

use glam::Vec3;

use crate::error::AttractorError;

/// A chaotic attractor variant with fixed coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attractor {
    /// Lorenz (σ=10, ρ=28, β=8/3).
    Lorenz,
    /// Lorenz Mod 2 (a=0.9, b=5.0, c=9.9, d=1.0).
    LorenzMod2,
    /// Dadras (a=3, b=2.7, c=1.7, d=2, e=9).
    Dadras,
    /// Aizawa (a=0.95, b=0.7, c=0.6, d=3.5, e=0.25, f=0.1).
    Aizawa,
    /// Arneodo (a=-5.5, b=3.5, d=-1).
    Arneodo,
    /// Dequan Li (a=40, b=1.833, c=0.16, d=0.65, e=55, f=20).
    Dequan,
}

impl Attractor {
    /// Every shipped variant, in registry order.
    pub const ALL: [Attractor; 6] = [
        Attractor::Lorenz,
        Attractor::LorenzMod2,
        Attractor::Dadras,
        Attractor::Aizawa,
        Attractor::Arneodo,
        Attractor::Dequan,
    ];

    /// The stable string tag for this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            Attractor::Lorenz => "lorenz",
            Attractor::LorenzMod2 => "lorenz-mod2",
            Attractor::Dadras => "dadras",
            Attractor::Aizawa => "aizawa",
            Attractor::Arneodo => "arneodo",
            Attractor::Dequan => "dequan",
        }
    }

    /// Look up a variant by tag.
    ///
    /// Fails with [`AttractorError::UnknownAttractor`] for anything outside
    /// the closed set; tags are never defaulted.
    pub fn from_tag(tag: &str) -> Result<Attractor, AttractorError> {
        Self::ALL
            .iter()
            .find(|a| a.tag() == tag)
            .copied()
            .ok_or_else(|| AttractorError::UnknownAttractor(tag.to_string()))
    }

    /// Evaluate the scaled derivative `(dx, dy, dz) * dt` at `p`.
    ///
    /// Pure: reads all three derivatives from the same unmutated input and
    /// never touches state outside its arguments. Callers own the Euler
    /// update; see [`crate::integrator::Integrator`].
    pub fn delta(&self, p: Vec3, dt: f32) -> Vec3 {
        let Vec3 { x, y, z } = p;
        let d = match self {
            Attractor::Lorenz => {
                let (sigma, rho, beta) = (10.0, 28.0, 8.0 / 3.0);
                Vec3::new(sigma * (y - x), x * (rho - z) - y, x * y - beta * z)
            }
            Attractor::LorenzMod2 => {
                let (a, b, c, d) = (0.9, 5.0, 9.9, 1.0);
                Vec3::new(
                    -a * x + y * y - z * z + a * c,
                    x * (y - b * z) + d,
                    -z + x * (b * y + z),
                )
            }
            Attractor::Dadras => {
                let (a, b, c, d, e) = (3.0, 2.7, 1.7, 2.0, 9.0);
                Vec3::new(
                    y - a * x + b * y * z,
                    c * y - x * z + z,
                    d * x * y - e * z,
                )
            }
            Attractor::Aizawa => {
                // e = 0.25 in the usual parameterization but unused by this form
                let (a, b, c, d, f) = (0.95, 0.7, 0.6, 3.5, 0.1);
                Vec3::new(
                    (z - b) * x - d * y,
                    d * x + (z - b) * y,
                    c + a * z - z * z * z / 3.0 - x * x + f * z * x * x * x,
                )
            }
            Attractor::Arneodo => {
                let (a, b, d) = (-5.5_f32, 3.5, -1.0);
                Vec3::new(y, z, -a * x - b * y - z + d * x * x * x)
            }
            Attractor::Dequan => {
                let (a, b, c, d, e, f) = (40.0, 1.833, 0.16, 0.65, 55.0, 20.0);
                Vec3::new(
                    a * (y - x) + c * x * z,
                    e * x + f * y - x * z,
                    b * z + x * y - d * x * x,
                )
            }
        };
        d * dt
    }

    /// Emit this variant's derivative as a WGSL function.
    ///
    /// The generated `attractor_delta(p, dt)` computes exactly the same value
    /// as [`Attractor::delta`], so the FBO simulation pass and the CPU
    /// integrator share one definition per tag.
    pub fn wgsl_delta_fn(&self) -> String {
        format!(
            r#"// {tag} attractor derivative
fn attractor_delta(p: vec3<f32>, dt: f32) -> vec3<f32> {{
{body}
    return vec3<f32>(dx, dy, dz) * dt;
}}
"#,
            tag = self.tag(),
            body = self.wgsl_body(),
        )
    }

    fn wgsl_body(&self) -> &'static str {
        match self {
            Attractor::Lorenz => {
                r#"    let sigma = 10.0;
    let rho = 28.0;
    let beta = 8.0 / 3.0;
    let dx = sigma * (p.y - p.x);
    let dy = p.x * (rho - p.z) - p.y;
    let dz = p.x * p.y - beta * p.z;"#
            }
            Attractor::LorenzMod2 => {
                r#"    let a = 0.9;
    let b = 5.0;
    let c = 9.9;
    let d = 1.0;
    let dx = -a * p.x + p.y * p.y - p.z * p.z + a * c;
    let dy = p.x * (p.y - b * p.z) + d;
    let dz = -p.z + p.x * (b * p.y + p.z);"#
            }
            Attractor::Dadras => {
                r#"    let a = 3.0;
    let b = 2.7;
    let c = 1.7;
    let d = 2.0;
    let e = 9.0;
    let dx = p.y - a * p.x + b * p.y * p.z;
    let dy = c * p.y - p.x * p.z + p.z;
    let dz = d * p.x * p.y - e * p.z;"#
            }
            Attractor::Aizawa => {
                r#"    let a = 0.95;
    let b = 0.7;
    let c = 0.6;
    let d = 3.5;
    let f = 0.1;
    let dx = (p.z - b) * p.x - d * p.y;
    let dy = d * p.x + (p.z - b) * p.y;
    let dz = c + a * p.z - p.z * p.z * p.z / 3.0 - p.x * p.x + f * p.z * p.x * p.x * p.x;"#
            }
            Attractor::Arneodo => {
                r#"    let a = -5.5;
    let b = 3.5;
    let d = -1.0;
    let dx = p.y;
    let dy = p.z;
    let dz = -a * p.x - b * p.y - p.z + d * p.x * p.x * p.x;"#
            }
            Attractor::Dequan => {
                r#"    let a = 40.0;
    let b = 1.833;
    let c = 0.16;
    let d = 0.65;
    let e = 55.0;
    let f = 20.0;
    let dx = a * (p.y - p.x) + c * p.x * p.z;
    let dy = e * p.x + f * p.y - p.x * p.z;
    let dz = b * p.z + p.x * p.y - d * p.x * p.x;"#
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_roundtrip() {
        for attractor in Attractor::ALL {
            assert_eq!(Attractor::from_tag(attractor.tag()), Ok(attractor));
        }
    }

    #[test]
    fn test_from_tag_unknown() {
        let err = Attractor::from_tag("rossler").unwrap_err();
        assert_eq!(err, AttractorError::UnknownAttractor("rossler".to_string()));
        // Tag matching is exact, no case folding
        assert!(Attractor::from_tag("Lorenz").is_err());
    }

    #[test]
    fn test_lorenz_derivative_figures() {
        // dx = 10*(4-2) = 20, dy = 2*(28-4)-4 = 44, dz = 2*4 - 8/3*4
        let d = Attractor::Lorenz.delta(Vec3::new(2.0, 4.0, 4.0), 1.0);
        assert!((d.x - 20.0).abs() < 1e-6);
        assert!((d.y - 44.0).abs() < 1e-6);
        assert!((d.z - (8.0 - 32.0 / 3.0)).abs() < 1e-6);
    }

    #[test]
    fn test_delta_scales_linearly_with_dt() {
        let p = Vec3::new(0.3, -1.2, 2.5);
        for attractor in Attractor::ALL {
            let full = attractor.delta(p, 0.01);
            let half = attractor.delta(p, 0.005);
            assert!((full - half * 2.0).length() < 1e-6, "{}", attractor.tag());
        }
    }

    #[test]
    fn test_delta_is_pure() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        for attractor in Attractor::ALL {
            let a = attractor.delta(p, 0.005);
            let b = attractor.delta(p, 0.005);
            assert_eq!(a, b, "{}", attractor.tag());
        }
    }

    #[test]
    fn test_wgsl_names_shared_entry_point() {
        for attractor in Attractor::ALL {
            let wgsl = attractor.wgsl_delta_fn();
            assert!(wgsl.contains("fn attractor_delta(p: vec3<f32>, dt: f32) -> vec3<f32>"));
            assert!(wgsl.contains(attractor.tag()));
        }
    }
}
