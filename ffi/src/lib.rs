use encounter_engine::api::{design_encounter, EncounterRequest};
use encounter_engine::{
    budget_thresholds, calculate_xp_budget, evaluate_composition, CompositionEntry, Difficulty,
    PartyProfile,
};
use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;
use serde::Deserialize;
use serde_json::{json, Value};

fn ok(env: &JNIEnv, value: Value) -> jstring {
    to_jstring(env, json!({ "ok": true, "result": value }))
}

fn err(env: &JNIEnv, e: impl std::fmt::Display) -> jstring {
    to_jstring(env, error_payload(e))
}

fn error_payload(e: impl std::fmt::Display) -> Value {
    json!({ "ok": false, "error": e.to_string() })
}

fn to_jstring(env: &JNIEnv, payload: Value) -> jstring {
    match env.new_string(payload.to_string()) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

fn respond(env: &JNIEnv, result: Result<Value, String>) -> jstring {
    match result {
        Ok(v) => ok(env, v),
        Err(e) => err(env, e),
    }
}

#[no_mangle]
pub extern "system" fn Java_com_encounter_Ffi_version<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jstring {
    to_jstring(&env, Value::String(version_internal().to_string()))
}

#[no_mangle]
pub extern "system" fn Java_com_encounter_Ffi_budgetJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let input: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    respond(&env, budget_internal(&input))
}

#[no_mangle]
pub extern "system" fn Java_com_encounter_Ffi_designEncounterJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let input: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    respond(&env, design_internal(&input))
}

#[no_mangle]
pub extern "system" fn Java_com_encounter_Ffi_evaluateCompositionJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let input: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    respond(&env, evaluate_internal(&input))
}

// Internal functions for testing without JNI overhead

pub fn version_internal() -> &'static str {
    concat!("encounter-ffi ", env!("CARGO_PKG_VERSION"))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BudgetInput {
    party_level: i64,
    party_size: i64,
    difficulty: Difficulty,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EvaluateInput {
    party_level: i64,
    party_size: i64,
    difficulty: Difficulty,
    monsters: Vec<CompositionEntry>,
}

fn invalid_config(e: serde_json::Error) -> String {
    format!("invalid_config: {}", e)
}

pub fn budget_internal(input: &str) -> Result<Value, String> {
    let req: BudgetInput = serde_json::from_str(input).map_err(invalid_config)?;
    let budget = calculate_xp_budget(req.party_level, req.party_size, req.difficulty)
        .map_err(|e| e.to_string())?;
    let thresholds =
        budget_thresholds(req.party_level, req.party_size).map_err(|e| e.to_string())?;
    Ok(json!({ "targetXP": budget, "thresholds": thresholds }))
}

pub fn design_internal(input: &str) -> Result<Value, String> {
    let req: EncounterRequest = serde_json::from_str(input).map_err(invalid_config)?;
    let design = design_encounter(req).map_err(|e| e.to_string())?;
    serde_json::to_value(design).map_err(|e| e.to_string())
}

pub fn evaluate_internal(input: &str) -> Result<Value, String> {
    let req: EvaluateInput = serde_json::from_str(input).map_err(invalid_config)?;
    let party = PartyProfile::new(req.party_level, req.party_size).map_err(|e| e.to_string())?;
    let target = calculate_xp_budget(req.party_level, req.party_size, req.difficulty)
        .map_err(|e| e.to_string())?;
    let report =
        evaluate_composition(&req.monsters, &party, target).map_err(|e| e.to_string())?;
    serde_json::to_value(report).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_internal() {
        let v = budget_internal(r#"{"partyLevel":3,"partySize":4,"difficulty":"medium"}"#).unwrap();
        assert_eq!(v["targetXP"], 600);
        assert_eq!(v["thresholds"]["deadly"], 1600);
    }

    #[test]
    fn test_budget_rejects_bad_level() {
        let e = budget_internal(r#"{"partyLevel":0,"partySize":4,"difficulty":"easy"}"#).unwrap_err();
        assert!(e.contains("party level 0"));
    }

    #[test]
    fn test_design_internal() {
        let v = design_internal(r#"{"partyLevel":3,"partySize":4,"difficulty":"medium"}"#).unwrap();
        assert_eq!(v["outcome"], "variants_found");
        assert_eq!(v["variants"][0]["matchScore"], 1.0);
        assert!(v["variants"].as_array().unwrap().len() <= 5);
    }

    #[test]
    fn test_design_invalid_json() {
        let e = design_internal("{not json").unwrap_err();
        assert!(e.starts_with("invalid_config:"));
    }

    #[test]
    fn test_evaluate_internal_with_unknown_cr() {
        let v = evaluate_internal(
            r#"{"partyLevel":3,"partySize":4,"difficulty":"medium",
                "monsters":[{"cr":"1/4","count":4},{"cr":"1/3","count":2}]}"#,
        )
        .unwrap();
        // six monsters in the 3-6 band: 200 × 2
        assert_eq!(v["adjustedXP"], 400);
        assert_eq!(v["monsterCount"], 6);
    }

    #[test]
    fn test_evaluate_internal_saturates_huge_counts() {
        let v = evaluate_internal(
            r#"{"partyLevel":20,"partySize":4,"difficulty":"deadly",
                "monsters":[{"cr":"30","count":30000}]}"#,
        )
        .unwrap();
        assert_eq!(v["totalXP"], 4_650_000_000u64);
        assert_eq!(v["adjustedXP"], u32::MAX);
        assert_eq!(v["rating"]["difficulty"], "deadly");
    }

    #[test]
    fn test_evaluate_internal_rejects_zero_count() {
        let e = evaluate_internal(
            r#"{"partyLevel":3,"partySize":4,"difficulty":"medium",
                "monsters":[{"cr":"1/4","count":0}]}"#,
        )
        .unwrap_err();
        assert!(e.contains("at least 1"), "{e}");
    }

    #[test]
    fn test_error_payload_shape() {
        let v = error_payload("boom \"quoted\"");
        assert_eq!(v["ok"], false);
        assert_eq!(v["error"], "boom \"quoted\"");
    }

    #[test]
    fn test_version() {
        assert!(version_internal().starts_with("encounter-ffi "));
    }
}
