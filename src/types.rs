use serde::{Serialize, Serializer};
use serde_json::Value;

pub type RawRecord = Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameType {
    #[default]
    Powerball = 0,
}

impl Serialize for GameType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// `date` is always `YYYY-MM-DD`, so string ordering matches calendar ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawResult {
    #[serde(rename = "d")]
    pub date: String,
    #[serde(rename = "w")]
    pub numbers: Vec<u32>,
    #[serde(rename = "s")]
    pub special: u32,
    #[serde(rename = "m")]
    pub multiplier: u32,
    #[serde(rename = "t")]
    pub game_type: GameType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_short_keys_in_order() {
        let draw = DrawResult {
            date: "2024-06-15".to_string(),
            numbers: vec![5, 12, 20, 33, 44],
            special: 26,
            multiplier: 2,
            game_type: GameType::Powerball,
        };

        let text = serde_json::to_string(&draw).unwrap();
        assert_eq!(text, r#"{"d":"2024-06-15","w":[5,12,20,33,44],"s":26,"m":2,"t":0}"#);
        assert_eq!(
            serde_json::to_value(&draw).unwrap(),
            json!({"d": "2024-06-15", "w": [5, 12, 20, 33, 44], "s": 26, "m": 2, "t": 0})
        );
    }
}
