/// Control-point curves and interpolation.
pub mod anim;
/// Easing functions.
pub mod ease;
/// Animatable attributes and their parameter sets.
pub mod params;
/// Damped spring follower.
pub mod spring;
