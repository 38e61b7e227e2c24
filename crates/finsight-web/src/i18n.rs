//! User-facing strings.

use finsight_common::Locale;
use finsight_statement::kpi::KpiKind;

pub struct Texts {
    pub app_title: &'static str,
    pub upload_heading: &'static str,
    pub upload_hint: &'static str,
    pub upload_button: &'static str,
    pub upload_prompt: &'static str,
    pub table_heading: &'static str,
    pub liquidity_warning: &'static str,
    pub analyze_heading: &'static str,
    pub analyze_button: &'static str,
    pub analyze_wait: &'static str,
    pub dashboard_heading: &'static str,
    pub charts_heading: &'static str,
    pub bar_title: &'static str,
    pub pie_title: &'static str,
    pub growth_title: &'static str,
    pub ai_heading: &'static str,
    pub legend_prior: &'static str,
    pub legend_current: &'static str,
    pub no_chart_data: &'static str,
    pub missing_key: &'static str,
    pub structure_error: &'static str,
    pub generic_error: &'static str,
    pub no_file: &'static str,
    pub bad_request: &'static str,
    pub session_expired: &'static str,
    pub back_link: &'static str,
}

const EN: Texts = Texts {
    app_title: "Financial Statement Analysis",
    upload_heading: "1. Upload the financial statement (Item | Prior period | Current period)",
    upload_hint: "Accepted formats: .xlsx, .xls, .csv. The first row is treated as a header.",
    upload_button: "Upload and analyse",
    upload_prompt: "Please upload an Excel file to start the analysis.",
    table_heading: "2. Growth rates and composition",
    liquidity_warning: "Missing 'SHORT-TERM ASSETS' or 'SHORT-TERM LIABILITIES'; the current ratio cannot be computed.",
    analyze_heading: "3. Financial position commentary (AI and dashboard)",
    analyze_button: "Request AI analysis",
    analyze_wait: "Sending data to the AI model…",
    dashboard_heading: "Financial indicators dashboard",
    charts_heading: "Detailed charts",
    bar_title: "Prior period vs current period",
    pie_title: "Asset structure, current period (share %)",
    growth_title: "Growth rate (%)",
    ai_heading: "AI commentary",
    legend_prior: "Prior period",
    legend_current: "Current period",
    no_chart_data: "No data to chart.",
    missing_key: "Error: GEMINI_API_KEY is not configured in the environment or secrets file.",
    structure_error: "Data structure error",
    generic_error: "An error occurred while processing the file",
    no_file: "No file was uploaded.",
    bad_request: "The request was incomplete. Please upload the file again.",
    session_expired: "This analysis is no longer available. Please upload the file again.",
    back_link: "Upload another file",
};

const VI: Texts = Texts {
    app_title: "Ứng dụng Phân Tích Báo Cáo Tài Chính",
    upload_heading: "1. Tải file Excel Báo cáo Tài chính (Chỉ tiêu | Năm trước | Năm sau)",
    upload_hint: "Định dạng hỗ trợ: .xlsx, .xls, .csv. Dòng đầu tiên là tiêu đề.",
    upload_button: "Tải lên và phân tích",
    upload_prompt: "Vui lòng tải lên file Excel để bắt đầu phân tích.",
    table_heading: "2. Bảng Tốc độ tăng trưởng & Tỷ trọng cơ cấu",
    liquidity_warning: "Thiếu chỉ tiêu 'TÀI SẢN NGẮN HẠN' hoặc 'NỢ NGẮN HẠN' để tính chỉ số.",
    analyze_heading: "3. Nhận xét Tình hình Tài chính (AI & Dashboard)",
    analyze_button: "Yêu cầu AI Phân tích",
    analyze_wait: "Đang gửi dữ liệu cho AI…",
    dashboard_heading: "Dashboard Tổng hợp Chỉ số Tài chính",
    charts_heading: "Biểu đồ Phân tích Chi tiết",
    bar_title: "So sánh giá trị Năm trước - Năm sau",
    pie_title: "Cơ cấu Tài sản Năm sau (Tỷ trọng %)",
    growth_title: "Tốc độ Tăng trưởng (%)",
    ai_heading: "Nhận xét Phân tích từ AI",
    legend_prior: "Năm trước",
    legend_current: "Năm sau",
    no_chart_data: "Không có dữ liệu để vẽ biểu đồ.",
    missing_key: "Lỗi: Chưa có GEMINI_API_KEY trong biến môi trường hoặc file secrets.",
    structure_error: "Lỗi cấu trúc dữ liệu",
    generic_error: "Có lỗi xảy ra khi xử lý file",
    no_file: "Chưa có file nào được tải lên.",
    bad_request: "Yêu cầu không hợp lệ. Vui lòng tải lại file.",
    session_expired: "Phiên phân tích đã hết hạn. Vui lòng tải lại file.",
    back_link: "Tải file khác",
};

pub fn texts(locale: Locale) -> &'static Texts {
    match locale {
        Locale::En => &EN,
        Locale::Vi => &VI,
    }
}

pub fn kpi_title(kind: KpiKind, locale: Locale) -> &'static str {
    match (kind, locale) {
        (KpiKind::TotalAssets, Locale::En) => "Total assets (current period)",
        (KpiKind::ShortTermAssets, Locale::En) => "Short-term assets (current period)",
        (KpiKind::ShortTermLiabilities, Locale::En) => "Short-term liabilities (current period)",
        (KpiKind::AverageGrowth, Locale::En) => "Average growth (%)",
        (KpiKind::ShortTermAssetsShare, Locale::En) => "Short-term assets share (%)",
        (KpiKind::CurrentRatio, Locale::En) => "Current ratio",
        (KpiKind::TotalAssets, Locale::Vi) => "Tổng tài sản (Năm sau)",
        (KpiKind::ShortTermAssets, Locale::Vi) => "Tài sản ngắn hạn (Năm sau)",
        (KpiKind::ShortTermLiabilities, Locale::Vi) => "Nợ ngắn hạn (Năm sau)",
        (KpiKind::AverageGrowth, Locale::Vi) => "Tốc độ tăng trưởng TB (%)",
        (KpiKind::ShortTermAssetsShare, Locale::Vi) => "Tỷ trọng TS ngắn hạn (%)",
        (KpiKind::CurrentRatio, Locale::Vi) => "Hệ số thanh toán hiện hành",
    }
}
