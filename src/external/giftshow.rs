use super::fulfillment::{FulfillmentProvider, FulfillmentReceipt, FulfillmentRequest};
use crate::config::GiftShowConfig;
use crate::error::{AppError, AppResult};
use crate::utils::mask_phone;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use utoipa::ToSchema;

/// 상품 리스트 조회
const API_CODE_GOODS_LIST: &str = "0101";
/// 상품 상세 조회
const API_CODE_GOODS_DETAIL: &str = "0111";
/// 쿠폰발송요청
const API_CODE_SEND: &str = "0204";
/// 비즈머니 잔액 조회
const API_CODE_BIZMONEY: &str = "0301";
const SUCCESS_CODE: &str = "0000";

fn vendor_error(operation: &str, code: Option<&str>, message: Option<&str>) -> AppError {
    AppError::ExternalApiError(format!(
        "GiftShow {operation} failed [{}]: {}",
        code.unwrap_or("-"),
        message.unwrap_or("Unknown error")
    ))
}

/// Prices and counts arrive as numbers on some endpoints and strings on others
fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Response body of `/send`; success is the body `code`, not the HTTP status
#[derive(Debug, Deserialize)]
pub struct SendResponse {
    pub code: Option<String>,
    pub message: Option<String>,
    pub result: Option<SendResultEnvelope>,
}

#[derive(Debug, Deserialize)]
pub struct SendResultEnvelope {
    pub code: Option<String>,
    pub message: Option<String>,
    pub result: Option<SendResultDetail>,
}

#[derive(Debug, Deserialize)]
pub struct SendResultDetail {
    #[serde(rename = "orderNo")]
    pub order_no: Option<String>,
    #[serde(rename = "pinNo")]
    pub pin_no: Option<String>,
}

impl SendResponse {
    /// Vendor order number, or our tr_id when the vendor omits it
    pub fn into_receipt(self, tr_id: &str) -> AppResult<FulfillmentReceipt> {
        if self.code.as_deref() != Some(SUCCESS_CODE) {
            return Err(vendor_error(
                "send",
                self.code.as_deref(),
                self.message.as_deref(),
            ));
        }

        let transaction_id = self
            .result
            .and_then(|r| r.result)
            .and_then(|r| r.order_no)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| tr_id.to_string());
        Ok(FulfillmentReceipt { transaction_id })
    }
}

/// 기프트쇼 상품 정보 (목록/상세 공통)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoodsItem {
    /// prizes.fulfillment_goods_code 에 넣는 값
    pub goods_code: String,
    pub goods_name: Option<String>,
    pub brand_name: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub sale_price: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub discount_price: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub real_price: Option<i64>,
    /// 유효기간 (일)
    #[serde(default, deserialize_with = "lenient_i64")]
    pub limit_day: Option<i64>,
    pub goods_img_s: Option<String>,
    pub goods_img_b: Option<String>,
    pub category_name1: Option<String>,
    pub goods_type_nm: Option<String>,
}

impl GoodsItem {
    /// Case-insensitive match on goods or brand name
    pub fn matches(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        [self.goods_name.as_deref(), self.brand_name.as_deref()]
            .into_iter()
            .flatten()
            .any(|name| name.to_lowercase().contains(&keyword))
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoodsPage {
    /// Vendor-side total, independent of the page size
    pub total: i64,
    pub goods: Vec<GoodsItem>,
}

#[derive(Debug, Deserialize)]
pub struct GoodsListResponse {
    pub code: Option<String>,
    pub message: Option<String>,
    pub result: Option<GoodsListResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsListResult {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub list_num: Option<i64>,
    pub goods_list: Option<Vec<GoodsItem>>,
}

impl GoodsListResponse {
    pub fn into_goods_page(self) -> AppResult<GoodsPage> {
        if self.code.as_deref() != Some(SUCCESS_CODE) {
            return Err(vendor_error(
                "goods list",
                self.code.as_deref(),
                self.message.as_deref(),
            ));
        }

        let (list_num, goods) = match self.result {
            Some(result) => (result.list_num, result.goods_list.unwrap_or_default()),
            None => (None, Vec::new()),
        };
        Ok(GoodsPage {
            total: list_num.unwrap_or(goods.len() as i64),
            goods,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct GoodsDetailResponse {
    pub code: Option<String>,
    pub message: Option<String>,
    pub result: Option<GoodsDetailResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsDetailResult {
    pub goods_detail: Option<GoodsItem>,
}

impl GoodsDetailResponse {
    pub fn into_goods(self, goods_code: &str) -> AppResult<GoodsItem> {
        if self.code.as_deref() != Some(SUCCESS_CODE) {
            return Err(vendor_error(
                "goods detail",
                self.code.as_deref(),
                self.message.as_deref(),
            ));
        }
        self.result
            .and_then(|r| r.goods_detail)
            .ok_or_else(|| AppError::NotFound(format!("기프트쇼 상품을 찾을 수 없습니다: {goods_code}")))
    }
}

#[derive(Debug, Deserialize)]
pub struct BalanceResponse {
    pub code: Option<String>,
    pub message: Option<String>,
    pub result: Option<BalanceResult>,
}

#[derive(Debug, Deserialize)]
pub struct BalanceResult {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub balance: Option<i64>,
}

impl BalanceResponse {
    /// 비즈머니 잔액 (원)
    pub fn into_balance(self) -> AppResult<i64> {
        if self.code.as_deref() != Some(SUCCESS_CODE) {
            return Err(vendor_error(
                "balance",
                self.code.as_deref(),
                self.message.as_deref(),
            ));
        }
        self.result
            .and_then(|r| r.balance)
            .ok_or_else(|| AppError::ExternalApiError("GiftShow balance missing from response".into()))
    }
}

#[derive(Clone)]
pub struct GiftShowClient {
    client: Client,
    config: GiftShowConfig,
}

impl GiftShowClient {
    pub fn new(config: GiftShowConfig) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent("randombox-backend/giftshow")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn auth_form(&self, api_code: &'static str) -> Vec<(&'static str, String)> {
        vec![
            ("api_code", api_code.to_string()),
            ("custom_auth_code", self.config.auth_key.clone()),
            ("custom_auth_token", self.config.auth_token.clone()),
            ("dev_yn", if self.config.dev_mode { "Y" } else { "N" }.to_string()),
        ]
    }

    fn send_form(&self, request: &FulfillmentRequest) -> Vec<(&'static str, String)> {
        let mut form = self.auth_form(API_CODE_SEND);
        form.extend([
            ("goods_code", request.goods_code.clone()),
            ("mms_msg", self.config.mms_message.clone()),
            ("mms_title", self.config.mms_title.clone()),
            ("callback_no", self.config.callback_no.clone()),
            ("phone_no", request.phone_number.clone()),
            ("tr_id", request.tr_id.clone()),
            ("user_id", self.config.user_id.clone()),
            ("gubun", "N".to_string()),
        ]);
        form
    }

    /// Form-encoded POST to `{base_url}{path}`; a non-2xx status is an error
    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&'static str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{path}", self.config.base_url.trim_end_matches('/'));
        let response = self.client.post(&url).form(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalApiError(format!(
                "GiftShow HTTP {} on {path}: {}",
                status.as_u16(),
                error_text
            )));
        }

        Ok(response.json().await?)
    }

    /// 상품 리스트 (start 는 1부터 시작하는 페이지 번호)
    pub async fn list_goods(&self, start: u32, size: u32) -> AppResult<GoodsPage> {
        let mut form = self.auth_form(API_CODE_GOODS_LIST);
        form.push(("start", start.to_string()));
        form.push(("size", size.to_string()));

        let body: GoodsListResponse = self.post_form("/goods", &form).await?;
        let page = body.into_goods_page()?;
        log::info!(
            "GiftShow goods list: page {start}, {} of {} goods",
            page.goods.len(),
            page.total
        );
        Ok(page)
    }

    pub async fn goods_detail(&self, goods_code: &str) -> AppResult<GoodsItem> {
        if goods_code.is_empty() || !goods_code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::ValidationError(format!(
                "상품코드 형식이 올바르지 않습니다: {goods_code}"
            )));
        }

        let form = self.auth_form(API_CODE_GOODS_DETAIL);
        let body: GoodsDetailResponse = self
            .post_form(&format!("/goods/{goods_code}"), &form)
            .await?;
        body.into_goods(goods_code)
    }

    pub async fn balance(&self) -> AppResult<i64> {
        let mut form = self.auth_form(API_CODE_BIZMONEY);
        form.push(("user_id", self.config.user_id.clone()));

        let body: BalanceResponse = self.post_form("/bizmoney", &form).await?;
        let balance = body.into_balance()?;
        log::info!("GiftShow bizmoney balance: {balance}");
        Ok(balance)
    }
}

#[async_trait]
impl FulfillmentProvider for GiftShowClient {
    async fn send(&self, request: &FulfillmentRequest) -> AppResult<FulfillmentReceipt> {
        log::info!(
            "GiftShow send: phone={}, goods_code={}, tr_id={}",
            mask_phone(&request.phone_number),
            request.goods_code,
            request.tr_id
        );

        let body: SendResponse = self.post_form("/send", &self.send_form(request)).await?;
        let receipt = body.into_receipt(&request.tr_id)?;
        log::info!(
            "GiftShow send succeeded: tr_id={}, transaction_id={}",
            request.tr_id,
            receipt.transaction_id
        );
        Ok(receipt)
    }

    fn provider_name(&self) -> &'static str {
        "giftshow"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GiftShowConfig {
        GiftShowConfig {
            base_url: "https://bizapi.giftishow.com/bizApi".into(),
            auth_key: "key".into(),
            auth_token: "token".into(),
            user_id: "event".into(),
            callback_no: "0212345678".into(),
            mms_title: "경품".into(),
            mms_message: "발송".into(),
            dev_mode: true,
            timeout_secs: 30,
            use_mock: false,
        }
    }

    #[test]
    fn test_success_body_uses_order_no() {
        let body: SendResponse = serde_json::from_str(
            r#"{"code":"0000","message":null,"result":{"code":"0000","result":{"orderNo":"20250901000123","pinNo":"1234"}}}"#,
        )
        .unwrap();
        let receipt = body.into_receipt("rb_00000001_abcdef").unwrap();
        assert_eq!(receipt.transaction_id, "20250901000123");
    }

    #[test]
    fn test_success_without_order_no_falls_back_to_tr_id() {
        let body: SendResponse = serde_json::from_str(r#"{"code":"0000"}"#).unwrap();
        let receipt = body.into_receipt("rb_00000001_abcdef").unwrap();
        assert_eq!(receipt.transaction_id, "rb_00000001_abcdef");
    }

    #[test]
    fn test_non_success_code_is_error() {
        let body: SendResponse =
            serde_json::from_str(r#"{"code":"E0011","message":"잔액 부족"}"#).unwrap();
        let err = body.into_receipt("rb_00000001_abcdef").unwrap_err();
        assert!(err.to_string().contains("E0011"));
    }

    #[test]
    fn test_send_form_carries_request_fields() {
        let client = GiftShowClient::new(config()).unwrap();
        let request = FulfillmentRequest {
            phone_number: "01012345678".into(),
            goods_code: "G00001621744".into(),
            tr_id: "rb_12345678_abc123".into(),
        };
        let form = client.send_form(&request);
        let get = |k: &str| {
            form.iter()
                .find(|(key, _)| *key == k)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("api_code"), Some("0204"));
        assert_eq!(get("custom_auth_code"), Some("key"));
        assert_eq!(get("phone_no"), Some("01012345678"));
        assert_eq!(get("goods_code"), Some("G00001621744"));
        assert_eq!(get("tr_id"), Some("rb_12345678_abc123"));
        assert_eq!(get("dev_yn"), Some("Y"));
        assert_eq!(get("gubun"), Some("N"));
    }

    #[test]
    fn test_goods_list_accepts_string_and_number_prices() {
        let body: GoodsListResponse = serde_json::from_str(
            r#"{"code":"0000","message":null,"result":{"listNum":2,"goodsList":[
                {"goodsCode":"G00001621744","goodsName":"(ICE)아메리카노","brandName":"메가MGC커피","salePrice":"2000","discountPrice":1940,"limitDay":30},
                {"goodsCode":"G00000280811","goodsName":"신세계상품권 1천원","brandName":"신세계","salePrice":1000,"goodsImgS":null}
            ]}}"#,
        )
        .unwrap();

        let page = body.into_goods_page().unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.goods[0].goods_code, "G00001621744");
        assert_eq!(page.goods[0].sale_price, Some(2000));
        assert_eq!(page.goods[0].discount_price, Some(1940));
        assert_eq!(page.goods[0].limit_day, Some(30));
        assert_eq!(page.goods[1].discount_price, None);
        assert_eq!(page.goods[1].goods_img_s, None);
    }

    #[test]
    fn test_goods_list_without_result_is_empty_page() {
        let body: GoodsListResponse = serde_json::from_str(r#"{"code":"0000"}"#).unwrap();
        let page = body.into_goods_page().unwrap();
        assert_eq!(page.total, 0);
        assert!(page.goods.is_empty());
    }

    #[test]
    fn test_goods_list_error_code() {
        let body: GoodsListResponse =
            serde_json::from_str(r#"{"code":"E0001","message":"인증 실패"}"#).unwrap();
        let err = body.into_goods_page().unwrap_err();
        assert!(matches!(err, AppError::ExternalApiError(_)));
        assert!(err.to_string().contains("E0001"));
    }

    #[test]
    fn test_goods_detail_parsing() {
        let body: GoodsDetailResponse = serde_json::from_str(
            r#"{"code":"0000","result":{"goodsDetail":{"goodsCode":"G00001621744","goodsName":"(ICE)아메리카노","realPrice":1940,"goodsTypeNm":"일반상품(물품교환형)","categoryName1":"카페"}}}"#,
        )
        .unwrap();
        let goods = body.into_goods("G00001621744").unwrap();
        assert_eq!(goods.real_price, Some(1940));
        assert_eq!(goods.category_name1.as_deref(), Some("카페"));
    }

    #[test]
    fn test_goods_detail_missing_is_not_found() {
        let body: GoodsDetailResponse =
            serde_json::from_str(r#"{"code":"0000","result":{}}"#).unwrap();
        assert!(matches!(
            body.into_goods("G1"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_balance_parsing() {
        let body: BalanceResponse =
            serde_json::from_str(r#"{"code":"0000","result":{"balance":"1520000"}}"#).unwrap();
        assert_eq!(body.into_balance().unwrap(), 1_520_000);

        let body: BalanceResponse =
            serde_json::from_str(r#"{"code":"0000","result":{}}"#).unwrap();
        assert!(body.into_balance().is_err());

        let body: BalanceResponse =
            serde_json::from_str(r#"{"code":"E0002","message":"권한 없음"}"#).unwrap();
        assert!(body.into_balance().unwrap_err().to_string().contains("E0002"));
    }

    #[test]
    fn test_goods_serialize_with_vendor_field_names() {
        let goods = GoodsItem {
            goods_code: "G1".into(),
            goods_img_s: Some("/s.png".into()),
            category_name1: Some("카페".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&goods).unwrap();
        assert_eq!(value["goodsCode"], "G1");
        assert_eq!(value["goodsImgS"], "/s.png");
        assert_eq!(value["categoryName1"], "카페");
    }

    #[test]
    fn test_goods_keyword_match() {
        let goods = GoodsItem {
            goods_code: "G1".into(),
            goods_name: Some("(ICE)아메리카노".into()),
            brand_name: Some("메가MGC커피".into()),
            ..Default::default()
        };
        assert!(goods.matches("메가"));
        assert!(goods.matches("ice"));
        assert!(!goods.matches("스타벅스"));
    }

    #[tokio::test]
    async fn test_goods_detail_rejects_path_characters() {
        let client = GiftShowClient::new(config()).unwrap();
        assert!(matches!(
            client.goods_detail("../send").await,
            Err(AppError::ValidationError(_))
        ));
    }
}
