use crate::trig;
use hashbrown::HashMap;

/// Name of the only two-argument function
pub const POW: &str = "pow";

lazy_static! {
    /// The reserved single argument functions, keyed by name. Angles are in
    /// radians.
    pub static ref FUNCTIONS: HashMap<&'static str, fn(f64) -> f64> = {
        let mut map = HashMap::<&'static str, fn(f64) -> f64>::new();
        map.insert("cos", trig::cos);
        map.insert("acos", trig::acos);
        map.insert("sin", trig::sin);
        map.insert("asin", trig::asin);
        map.insert("tan", trig::tan);
        map.insert("atan", trig::atan);
        map.insert("sqrt", f64::sqrt);
        map.shrink_to_fit();
        map
    };
}
