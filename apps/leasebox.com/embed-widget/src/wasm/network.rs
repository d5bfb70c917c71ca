use super::*;

pub(super) async fn send_api_call<T: for<'de> Deserialize<'de>>(
    call: &ApiCall,
) -> Result<T, ApiError> {
    let request = plan_api_call(call);
    let (status, status_text, raw) = execute_planned_request(&request).await?;
    decode_json_payload(status, &status_text, &raw)
}

pub(super) async fn send_opaque_api_call(call: &ApiCall) -> Result<ApiPayload, ApiError> {
    let request = plan_api_call(call);
    let (status, status_text, raw) = execute_planned_request(&request).await?;
    decode_response_payload(status, &status_text, &raw)
}

pub(super) async fn send_upload_request(file: web_sys::File) -> Result<UploadResponse, ApiError> {
    let request = plan_upload_request();
    let form = web_sys::FormData::new()
        .map_err(|_| ApiError::transport("failed to build multipart form data"))?;
    form.append_with_blob(UPLOAD_FIELD_NAME, &file)
        .map_err(|_| ApiError::transport("failed to attach file to form data"))?;

    let mut request_builder = Request::post(&request.path);
    for (header_name, header_value) in upload_request_headers(&BrowserSessionStore) {
        request_builder = request_builder.header(&header_name, &header_value);
    }

    // The browser generates the multipart boundary; no explicit content type.
    let request = request_builder
        .body(form)
        .map_err(|error| ApiError::transport(format!("failed to build request body: {error}")))?;
    let response = request.send().await.map_err(map_network_error)?;

    let (status, status_text, raw) = read_response_parts(response).await?;
    decode_json_payload(status, &status_text, &raw)
}

async fn execute_planned_request(
    request: &PlannedRequest,
) -> Result<(u16, String, String), ApiError> {
    let mut request_builder = match request.method {
        HttpMethod::Get => Request::get(&request.path),
        HttpMethod::Post => Request::post(&request.path),
    };

    for (header_name, header_value) in json_request_headers(request, &BrowserSessionStore) {
        request_builder = request_builder.header(&header_name, &header_value);
    }

    let response = if let Some(body) = request.body.as_ref() {
        let body = serde_json::to_string(body).map_err(|error| {
            ApiError::transport(format!("failed to serialize request body: {error}"))
        })?;
        let request = request_builder
            .body(body)
            .map_err(|error| ApiError::transport(format!("failed to build request body: {error}")))?;
        request.send().await.map_err(map_network_error)?
    } else {
        request_builder.send().await.map_err(map_network_error)?
    };

    read_response_parts(response).await
}

async fn read_response_parts(
    response: gloo_net::http::Response,
) -> Result<(u16, String, String), ApiError> {
    let status = response.status();
    let status_text = response.status_text();
    let raw = response.text().await.map_err(|error| ApiError {
        status,
        message: error.to_string(),
    })?;
    Ok((status, status_text, raw))
}

fn map_network_error(error: gloo_net::Error) -> ApiError {
    ApiError::transport(error.to_string())
}
