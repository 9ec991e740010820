use crate::api::{ImageFile, PhotoShareApi};
use crate::error::{ApiError, ApiResult};
use crate::page::access::CreatorPass;
use crate::request::HttpClient;
use photoshare_shared::NewPhoto;

pub const NOT_AN_IMAGE: &str = "Please select an image file";
pub const UPLOAD_FAILED: &str = "Upload failed";

/// 上传表单
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
    pub file: Option<ImageFile>,
    pub fields: NewPhoto,
}

impl UploadForm {
    /// 选择文件；非图片时保留原来的文件并返回错误提示
    pub fn select_file(&mut self, file: ImageFile) -> Result<(), &'static str> {
        if !file.is_image() {
            return Err(NOT_AN_IMAGE);
        }
        self.file = Some(file);
        Ok(())
    }

    /// 需要已选文件且标题非空
    pub fn can_submit(&self) -> bool {
        self.file.is_some() && !self.fields.title.trim().is_empty()
    }
}

/// 提交上传
pub async fn submit<C: HttpClient>(
    api: &PhotoShareApi<C>,
    pass: CreatorPass<'_>,
    form: UploadForm,
) -> ApiResult<()> {
    if !form.can_submit() {
        return Err(ApiError::invalid_input("An image and a title are required"));
    }
    let UploadForm { file, fields } = form;
    let image = file.ok_or_else(|| ApiError::invalid_input(NOT_AN_IMAGE))?;

    api.authorized(&pass.session().token)
        .photos()
        .create(&fields, image)
        .await
        .inspect(|_| tracing::info!(title = %fields.title, "photo uploaded"))
}

/// 内联提示文字，服务端没有给出原因时使用默认文案
pub fn failure_message(error: &ApiError) -> String {
    if error.message.trim().is_empty() {
        UPLOAD_FAILED.to_string()
    } else {
        error.message.clone()
    }
}
