//! Fixed document labels in English and Arabic

use arabic_text::Language;

/// Every caption a composer prints
#[derive(Debug)]
pub struct Labels {
    pub tax_invoice: &'static str,
    pub simplified_invoice: &'static str,
    pub invoice_number: &'static str,
    pub issue_date: &'static str,
    pub due_date: &'static str,
    pub currency: &'static str,
    pub uuid: &'static str,
    pub zatca_status: &'static str,
    pub seller: &'static str,
    pub customer: &'static str,
    pub supplier: &'static str,
    pub buyer: &'static str,
    pub vat_number: &'static str,
    pub index: &'static str,
    pub description: &'static str,
    pub quantity: &'static str,
    pub unit_price: &'static str,
    pub tax: &'static str,
    pub total: &'static str,
    pub subtotal: &'static str,
    pub total_tax: &'static str,
    pub grand_total: &'static str,
    pub notes: &'static str,
    pub no_data: &'static str,
    pub generated_at: &'static str,
    pub page: &'static str,
    pub report_title: &'static str,
    pub period: &'static str,
    pub from: &'static str,
    pub to: &'static str,
    pub sales: &'static str,
    pub purchases: &'static str,
    pub expenses: &'static str,
    pub net: &'static str,
    pub sales_by_type: &'static str,
    pub top_customers: &'static str,
    pub expenses_by_category: &'static str,
    pub transaction_type: &'static str,
    pub count: &'static str,
    pub customer_name: &'static str,
    pub invoices: &'static str,
    pub category: &'static str,
    pub project_title: &'static str,
    pub code: &'static str,
    pub status: &'static str,
    pub owner: &'static str,
    pub budget: &'static str,
    pub progress: &'static str,
    pub progress_updates: &'static str,
    pub date: &'static str,
    pub note: &'static str,
    pub author: &'static str,
}

static EN: Labels = Labels {
    tax_invoice: "Tax Invoice",
    simplified_invoice: "Simplified Tax Invoice",
    invoice_number: "Invoice No.",
    issue_date: "Issue date",
    due_date: "Due date",
    currency: "Currency",
    uuid: "UUID",
    zatca_status: "ZATCA status",
    seller: "Seller",
    customer: "Customer",
    supplier: "Supplier",
    buyer: "Buyer",
    vat_number: "VAT No.",
    index: "#",
    description: "Description",
    quantity: "Qty",
    unit_price: "Unit price",
    tax: "Tax",
    total: "Total",
    subtotal: "Subtotal",
    total_tax: "Total tax",
    grand_total: "Grand total",
    notes: "Notes",
    no_data: "No data",
    generated_at: "Generated at",
    page: "Page",
    report_title: "Business Report",
    period: "Period",
    from: "From",
    to: "To",
    sales: "Sales",
    purchases: "Purchases",
    expenses: "Expenses",
    net: "Net",
    sales_by_type: "Sales by transaction type",
    top_customers: "Top customers",
    expenses_by_category: "Expenses by category",
    transaction_type: "Type",
    count: "Count",
    customer_name: "Customer",
    invoices: "Invoices",
    category: "Category",
    project_title: "Project Progress",
    code: "Code",
    status: "Status",
    owner: "Owner",
    budget: "Budget",
    progress: "Progress",
    progress_updates: "Progress updates",
    date: "Date",
    note: "Note",
    author: "Author",
};

static AR: Labels = Labels {
    tax_invoice: "فاتورة ضريبية",
    simplified_invoice: "فاتورة ضريبية مبسطة",
    invoice_number: "رقم الفاتورة",
    issue_date: "تاريخ الإصدار",
    due_date: "تاريخ الاستحقاق",
    currency: "العملة",
    uuid: "المعرف الفريد",
    zatca_status: "حالة زاتكا",
    seller: "البائع",
    customer: "العميل",
    supplier: "المورد",
    buyer: "المشتري",
    vat_number: "الرقم الضريبي",
    index: "#",
    description: "الوصف",
    quantity: "الكمية",
    unit_price: "سعر الوحدة",
    tax: "الضريبة",
    total: "الإجمالي",
    subtotal: "المجموع الفرعي",
    total_tax: "إجمالي الضريبة",
    grand_total: "الإجمالي المستحق",
    notes: "ملاحظات",
    no_data: "لا توجد بيانات",
    generated_at: "تم الإنشاء في",
    page: "صفحة",
    report_title: "تقرير الأعمال",
    period: "الفترة",
    from: "من",
    to: "إلى",
    sales: "المبيعات",
    purchases: "المشتريات",
    expenses: "المصروفات",
    net: "الصافي",
    sales_by_type: "المبيعات حسب نوع العملية",
    top_customers: "أهم العملاء",
    expenses_by_category: "المصروفات حسب الفئة",
    transaction_type: "النوع",
    count: "العدد",
    customer_name: "العميل",
    invoices: "الفواتير",
    category: "الفئة",
    project_title: "تقدم المشروع",
    code: "الرمز",
    status: "الحالة",
    owner: "المسؤول",
    budget: "الميزانية",
    progress: "نسبة الإنجاز",
    progress_updates: "تحديثات التقدم",
    date: "التاريخ",
    note: "ملاحظة",
    author: "بواسطة",
};

pub fn labels(language: Language) -> &'static Labels {
    match language {
        Language::En => &EN,
        Language::Ar => &AR,
    }
}
