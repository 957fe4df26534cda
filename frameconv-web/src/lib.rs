/// frameconv Web - WASM bindings for coordinate frame conversion
///
/// Exposes the core conversions to JavaScript. Vectors and angle triples
/// cross the boundary as `Float64Array`s; failures surface as error strings.
use frameconv_core::{
    convert_euler_order as core_convert_euler_order, convert_position_str, AxisSet,
    CoordinateFrame, CoordinateFrameConverter, EulerAngles, FrameError,
};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// JSON shape accepted by [`WebConverter::from_json`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConverterSpec {
    from: CoordinateFrame,
    to: CoordinateFrame,
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WebConverter {
    inner: CoordinateFrameConverter,
}

impl WebConverter {
    fn try_new(
        from_axes: &str,
        from_order: &str,
        to_axes: &str,
        to_order: &str,
    ) -> Result<Self, FrameError> {
        let inner =
            CoordinateFrameConverter::from_descriptors(from_axes, from_order, to_axes, to_order)?;
        Ok(Self { inner })
    }

    fn try_from_json(json: &str) -> Result<Self, serde_json::Error> {
        let spec: ConverterSpec = serde_json::from_str(json)?;
        Ok(Self {
            inner: CoordinateFrameConverter::new(spec.from, spec.to),
        })
    }
}

#[wasm_bindgen]
impl WebConverter {
    #[wasm_bindgen(constructor)]
    pub fn new(
        from_axes: &str,
        from_order: &str,
        to_axes: &str,
        to_order: &str,
    ) -> Result<WebConverter, JsValue> {
        Self::try_new(from_axes, from_order, to_axes, to_order).map_err(to_js)
    }

    /// Build from `{"from": {"axes", "rotation_order"}, "to": {...}}`
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<WebConverter, JsValue> {
        Self::try_from_json(json).map_err(to_js)
    }

    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        let spec = ConverterSpec {
            from: *self.inner.from(),
            to: *self.inner.to(),
        };
        serde_json::to_string(&spec).map_err(to_js)
    }

    #[wasm_bindgen(js_name = convertPosition)]
    pub fn convert_position(&self, x: f64, y: f64, z: f64) -> Vec<f64> {
        let res = self.inner.convert_position(&Vector3::new(x, y, z));
        res.iter().copied().collect()
    }

    #[wasm_bindgen(js_name = convertEulerAngles)]
    pub fn convert_euler_angles(&self, e0: f64, e1: f64, e2: f64) -> Vec<f64> {
        let res = self.inner.convert_euler_angles(&EulerAngles::new(e0, e1, e2));
        res.as_array().to_vec()
    }

    /// The converter running the other way
    pub fn inverse(&self) -> WebConverter {
        WebConverter {
            inner: self.inner.inverse().clone(),
        }
    }

    pub fn describe(&self) -> String {
        self.inner.to_string()
    }
}

/// Convert a position between two spatial descriptors
#[wasm_bindgen(js_name = convertPosition)]
pub fn convert_position(
    from: &str,
    to: &str,
    x: f64,
    y: f64,
    z: f64,
) -> Result<Vec<f64>, JsValue> {
    let res = convert_position_str(from, to, &Vector3::new(x, y, z)).map_err(to_js)?;
    Ok(res.iter().copied().collect())
}

/// Re-express Euler angles about another rotation order
#[wasm_bindgen(js_name = convertEulerOrder)]
pub fn convert_euler_order(
    from: &str,
    to: &str,
    e0: f64,
    e1: f64,
    e2: f64,
) -> Result<Vec<f64>, JsValue> {
    let from = AxisSet::rotation_order(from).map_err(to_js)?;
    let to = AxisSet::rotation_order(to).map_err(to_js)?;
    let res = core_convert_euler_order(&from, &to, &EulerAngles::new(e0, e1, e2));
    Ok(res.as_array().to_vec())
}

#[cfg(test)]
mod tests {
    // JsValue cannot be built off wasm, so only the success paths and the
    // plain-Rust constructors are exercised here.
    use super::*;

    #[test]
    fn test_converter_positions() {
        let converter = WebConverter::try_new("+X+Y-Z", "-Z-X-Y", "-Y+Z+X", "+Z+Y+X").unwrap();
        assert_eq!(converter.convert_position(1.0, 2.0, 3.0), vec![-3.0, -1.0, 2.0]);
        let back = converter.inverse().convert_position(-3.0, -1.0, 2.0);
        assert_eq!(back, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_invalid_descriptor() {
        let err = WebConverter::try_new("XYX", "XYZ", "XYZ", "XYZ").err().unwrap();
        assert!(err.is_redundancy());
    }

    #[test]
    fn test_json_round_trip() {
        let json = r#"{"from":{"axes":"+X+Y-Z","rotation_order":"-Z-X-Y"},"to":{"axes":"-Y+Z+X","rotation_order":"+Z+Y+X"}}"#;
        let converter = WebConverter::try_from_json(json).unwrap();
        assert_eq!(converter.describe(), "+X+Y-Z, -Z-X-Y to -Y+Z+X, +Z+Y+X");
        assert_eq!(converter.to_json().unwrap(), json);
        let missing_to = r#"{"from":{"axes":"XYZ","rotation_order":"XYZ"}}"#;
        assert!(WebConverter::try_from_json(missing_to).is_err());
        let bad_axes = r#"{"from":{"axes":"XY","rotation_order":"XYZ"},"to":{"axes":"XYZ","rotation_order":"XYZ"}}"#;
        assert!(WebConverter::try_from_json(bad_axes).is_err());
    }

    #[test]
    fn test_free_functions() {
        let res = convert_position("+X+Y-Z", "+Y-Z+X", 1.0, 2.0, 3.0).unwrap();
        assert_eq!(res, vec![-3.0, 1.0, -2.0]);

        let res = convert_euler_order("XYZ", "XYZ", 20.0, 40.0, 80.0).unwrap();
        for (a, b) in res.iter().zip([20.0, 40.0, 80.0]) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_identity_euler_conversion() {
        let converter = WebConverter::try_new("XY-Z", "-Z-X-Y", "XY-Z", "-Z-X-Y").unwrap();
        let res = converter.convert_euler_angles(20.0, 40.0, 80.0);
        for (a, b) in res.iter().zip([20.0, 40.0, 80.0]) {
            assert!((a - b).abs() < 1e-9);
        }
    }
}
