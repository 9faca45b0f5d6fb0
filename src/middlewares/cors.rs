use actix_cors::Cors;

pub fn create_cors() -> Cors {
    Cors::default()
        .allowed_origin_fn(|_, _req_head| {
            // 이벤트 페이지가 별도 도메인에서 호출한다
            true
        })
        .allowed_methods(vec!["GET", "POST", "PATCH", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}
