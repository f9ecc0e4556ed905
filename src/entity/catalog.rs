//! Built-in program table
//!
//! Order matters: extraction returns the first entry whose variants match.

use super::Entity;

struct Row {
    id: &'static str,
    name: &'static str,
    ministry_code: &'static str,
    school_id: &'static str,
    school_name: &'static str,
    domain: &'static str,
    variants: &'static [&'static str],
}

const CS: &str = "Trường Khoa học Máy tính";
const ENG: &str = "Trường Công nghệ";
const MED: &str = "Trường Y - Dược";
const ECON: &str = "Trường Kinh tế";
const TOUR: &str = "Trường Du lịch";
const LANG: &str = "Trường Ngoại ngữ và Khoa học Xã hội";

#[rustfmt::skip]
const ROWS: &[Row] = &[
    // Computer science
    Row { id: "CS_CS", name: "Khoa học máy tính", ministry_code: "7480101", school_id: "CS", school_name: CS, domain: "CNTT",
          variants: &["khoa học máy tính", "khoa hoc may tinh", "khmt", "computer science", "cs"] },
    Row { id: "CS_SE", name: "Kỹ thuật phần mềm", ministry_code: "7480103", school_id: "CS", school_name: CS, domain: "CNTT",
          variants: &["kỹ thuật phần mềm", "ky thuat phan mem", "ktpm", "software engineering", "se"] },
    Row { id: "CS_AI", name: "Trí tuệ nhân tạo", ministry_code: "7480107", school_id: "CS_AI", school_name: CS, domain: "CNTT",
          variants: &["trí tuệ nhân tạo", "tri tue nhan tao", "ai", "artificial intelligence", "trí tuệ nhân tạo ai"] },
    Row { id: "CS_DS", name: "Khoa học dữ liệu", ministry_code: "7480109", school_id: "CS", school_name: CS, domain: "CNTT",
          variants: &["khoa học dữ liệu", "khoa hoc du lieu", "khdt", "data science", "ds"] },
    Row { id: "CS_IS", name: "An toàn thông tin", ministry_code: "7480202", school_id: "CS", school_name: CS, domain: "CNTT",
          variants: &["an toàn thông tin", "an toan thong tin", "attt", "information security", "security", "cyber security"] },
    Row { id: "CS_NET", name: "Mạng máy tính và Truyền thông dữ liệu", ministry_code: "7480108", school_id: "CS", school_name: CS, domain: "CNTT",
          variants: &["mạng máy tính", "mang may tinh", "truyền thông dữ liệu", "truyen thong du lieu", "network", "networking"] },

    // Engineering and design
    Row { id: "ENG_EE", name: "Kỹ thuật điện", ministry_code: "7520201", school_id: "ENG", school_name: ENG, domain: "Engineering",
          variants: &["kỹ thuật điện", "ky thuat dien", "ktd", "electrical engineering", "điện"] },
    Row { id: "ENG_EEE", name: "Kỹ thuật điện - điện tử", ministry_code: "7520207", school_id: "ENG", school_name: ENG, domain: "Engineering",
          variants: &["kỹ thuật điện điện tử", "ky thuat dien dien tu", "điện điện tử", "dien dien tu", "electrical electronics"] },
    Row { id: "ENG_MECHATRONICS", name: "Cơ điện tử", ministry_code: "7520114", school_id: "ENG", school_name: ENG, domain: "Engineering",
          variants: &["cơ điện tử", "co dien tu", "mechatronics"] },
    Row { id: "ENG_AUTOMATION", name: "Điều khiển và Tự động hóa", ministry_code: "7520216", school_id: "ENG", school_name: ENG, domain: "Engineering",
          variants: &["điều khiển tự động hóa", "dieu khien tu dong hoa", "tự động hóa", "tu dong hoa", "automation", "điều khiển và tự động hóa"] },
    Row { id: "ENG_MANUFACTURING", name: "Công nghệ chế tạo máy", ministry_code: "7520118", school_id: "ENG", school_name: ENG, domain: "Engineering",
          variants: &["công nghệ chế tạo máy", "cong nghe che tao may", "chế tạo máy", "che tao may", "manufacturing"] },
    Row { id: "ENG_AUTOMOTIVE", name: "Công nghệ ô tô", ministry_code: "7510205", school_id: "ENG", school_name: ENG, domain: "Engineering",
          variants: &["công nghệ ô tô", "cong nghe o to", "ô tô", "o to", "automotive"] },
    Row { id: "ENG_CIVIL", name: "Kỹ thuật xây dựng", ministry_code: "7580201", school_id: "ENG", school_name: ENG, domain: "Engineering",
          variants: &["kỹ thuật xây dựng", "ky thuat xay dung", "xây dựng", "xay dung", "civil engineering"] },
    Row { id: "ENG_CIVIL_TECH", name: "Công nghệ kỹ thuật công trình xây dựng", ministry_code: "7510103", school_id: "ENG", school_name: ENG, domain: "Engineering",
          variants: &["công nghệ kỹ thuật công trình xây dựng", "cong nghe ky thuat cong trinh xay dung", "công trình xây dựng", "cong trinh xay dung"] },
    Row { id: "ENG_TRANSPORT_CIVIL", name: "Xây dựng công trình giao thông", ministry_code: "7580205", school_id: "ENG", school_name: ENG, domain: "Engineering",
          variants: &["xây dựng công trình giao thông", "xay dung cong trinh giao thong", "công trình giao thông", "cong trinh giao thong", "transport civil"] },
    Row { id: "ENG_ARCH", name: "Kiến trúc", ministry_code: "7580101", school_id: "ENG", school_name: ENG, domain: "Engineering",
          variants: &["kiến trúc", "kien truc", "architecture"] },
    Row { id: "ENG_GRAPHIC", name: "Thiết kế đồ họa", ministry_code: "7210403", school_id: "ENG", school_name: ENG, domain: "Design",
          variants: &["thiết kế đồ họa", "thiet ke do hoa", "đồ họa", "do hoa", "graphic design"] },
    Row { id: "ENG_FASHION", name: "Thiết kế thời trang", ministry_code: "7210404", school_id: "ENG", school_name: ENG, domain: "Design",
          variants: &["thiết kế thời trang", "thiet ke thoi trang", "thời trang", "thoi trang", "fashion design"] },

    // Medicine and pharmacy
    Row { id: "MED_MD", name: "Y khoa", ministry_code: "7720101", school_id: "MED", school_name: MED, domain: "Medical",
          variants: &["y khoa", "medicine", "bác sĩ", "bac si"] },
    Row { id: "MED_DENTAL", name: "Răng - Hàm - Mặt", ministry_code: "7720501", school_id: "MED", school_name: MED, domain: "Medical",
          variants: &["răng hàm mặt", "rang ham mat", "nha khoa", "dental", "dentistry"] },
    Row { id: "MED_PHARMACY", name: "Dược học", ministry_code: "7720201", school_id: "MED", school_name: MED, domain: "Medical",
          variants: &["dược học", "duoc hoc", "dược", "duoc", "pharmacy", "dược sĩ"] },
    Row { id: "MED_NURSING", name: "Điều dưỡng", ministry_code: "7720301", school_id: "MED", school_name: MED, domain: "Medical",
          variants: &["điều dưỡng", "dieu duong", "nursing", "y tá", "y ta"] },
    Row { id: "MED_BIOTECH", name: "Công nghệ sinh học", ministry_code: "7420201", school_id: "MED", school_name: MED, domain: "Medical",
          variants: &["công nghệ sinh học", "cong nghe sinh hoc", "sinh học", "sinh hoc", "biotechnology", "biotech"] },
    Row { id: "MED_BIOMED", name: "Kỹ thuật y sinh", ministry_code: "7520212", school_id: "MED", school_name: MED, domain: "Medical",
          variants: &["kỹ thuật y sinh", "ky thuat y sinh", "y sinh", "biomedical engineering"] },

    // Economics and business
    Row { id: "ECON_BA", name: "Quản trị kinh doanh", ministry_code: "7340101", school_id: "ECON", school_name: ECON, domain: "Business",
          variants: &["quản trị kinh doanh", "quan tri kinh doanh", "qtkd", "business administration", "kinh doanh"] },
    Row { id: "ECON_MARKETING", name: "Marketing", ministry_code: "7340115", school_id: "ECON", school_name: ECON, domain: "Business",
          variants: &["marketing", "tiếp thị", "tiep thi"] },
    Row { id: "ECON_COMMERCE", name: "Kinh doanh thương mại", ministry_code: "7340121", school_id: "ECON", school_name: ECON, domain: "Business",
          variants: &["kinh doanh thương mại", "kinh doanh thuong mai", "thương mại", "thuong mai", "commerce"] },
    Row { id: "ECON_ECOMMERCE", name: "Thương mại điện tử", ministry_code: "7340122", school_id: "ECON", school_name: ECON, domain: "Business",
          variants: &["thương mại điện tử", "thuong mai dien tu", "tmdt", "ecommerce", "e-commerce"] },
    Row { id: "ECON_FINANCE", name: "Tài chính - Ngân hàng", ministry_code: "7340201", school_id: "ECON", school_name: ECON, domain: "Finance",
          variants: &["tài chính ngân hàng", "tai chinh ngan hang", "tài chính", "tai chinh", "ngân hàng", "ngan hang", "finance", "banking"] },
    Row { id: "ECON_ACCOUNTING", name: "Kế toán", ministry_code: "7340301", school_id: "ECON", school_name: ECON, domain: "Finance",
          variants: &["kế toán", "ke toan", "accounting"] },
    Row { id: "ECON_AUDIT", name: "Kiểm toán", ministry_code: "7340302", school_id: "ECON", school_name: ECON, domain: "Finance",
          variants: &["kiểm toán", "kiem toan", "audit", "auditing"] },
    Row { id: "ECON_HRM", name: "Quản trị nhân lực", ministry_code: "7340404", school_id: "ECON", school_name: ECON, domain: "Business",
          variants: &["quản trị nhân lực", "quan tri nhan luc", "qtnl", "nhân sự", "nhan su", "hr", "human resources"] },
    Row { id: "ECON_INVESTMENT", name: "Kinh tế đầu tư", ministry_code: "7310104", school_id: "ECON", school_name: ECON, domain: "Finance",
          variants: &["kinh tế đầu tư", "kinh te dau tu", "đầu tư", "dau tu", "investment"] },

    // Tourism and hospitality
    Row { id: "TOUR_TOURISM", name: "Du lịch", ministry_code: "7810101", school_id: "TOUR", school_name: TOUR, domain: "Tourism",
          variants: &["du lịch", "du lich", "tourism"] },
    Row { id: "TOUR_TRAVEL", name: "Quản lý dịch vụ Du lịch và Lữ hành", ministry_code: "7810103", school_id: "TOUR", school_name: TOUR, domain: "Tourism",
          variants: &["quản lý dịch vụ du lịch", "quan ly dich vu du lich", "lữ hành", "lu hanh", "travel management"] },
    Row { id: "TOUR_HOTEL", name: "Quản trị khách sạn", ministry_code: "7810201", school_id: "TOUR", school_name: TOUR, domain: "Hospitality",
          variants: &["quản trị khách sạn", "quan tri khach san", "khách sạn", "khach san", "hotel management", "hotel"] },
    Row { id: "TOUR_RESTAURANT", name: "Quản trị nhà hàng và dịch vụ ăn uống", ministry_code: "7810202", school_id: "TOUR", school_name: TOUR, domain: "Hospitality",
          variants: &["quản trị nhà hàng", "quan tri nha hang", "nhà hàng", "nha hang", "ăn uống", "an uong", "restaurant management"] },
    Row { id: "TOUR_EVENT", name: "Quản trị sự kiện", ministry_code: "7340403", school_id: "TOUR", school_name: TOUR, domain: "Hospitality",
          variants: &["quản trị sự kiện", "quan tri su kien", "sự kiện", "su kien", "event management"] },

    // Languages and social sciences
    Row { id: "LANG_EN", name: "Ngôn ngữ Anh", ministry_code: "7220201", school_id: "LANG", school_name: LANG, domain: "Language",
          variants: &["ngôn ngữ anh", "ngon ngu anh", "tiếng anh", "tieng anh", "ngoại ngữ anh", "english", "anh văn"] },
    Row { id: "LANG_CN", name: "Ngôn ngữ Trung Quốc", ministry_code: "7220204", school_id: "LANG", school_name: LANG, domain: "Language",
          variants: &["ngôn ngữ trung quốc", "ngon ngu trung quoc", "tiếng trung", "tieng trung", "trung quốc", "chinese", "hán ngữ"] },
    Row { id: "LANG_JP", name: "Ngôn ngữ Nhật", ministry_code: "7220209", school_id: "LANG", school_name: LANG, domain: "Language",
          variants: &["ngôn ngữ nhật", "ngon ngu nhat", "tiếng nhật", "tieng nhat", "nhật bản", "japanese", "nhật ngữ"] },
    Row { id: "LANG_KR", name: "Ngôn ngữ Hàn Quốc", ministry_code: "7220210", school_id: "LANG", school_name: LANG, domain: "Language",
          variants: &["ngôn ngữ hàn quốc", "ngon ngu han quoc", "tiếng hàn", "tieng han", "hàn quốc", "korean", "hàn ngữ"] },
    Row { id: "LANG_LITERATURE", name: "Văn học", ministry_code: "7229030", school_id: "LANG", school_name: LANG, domain: "Literature",
          variants: &["văn học", "van hoc", "literature"] },
    Row { id: "LANG_VN_STUDIES", name: "Việt Nam học", ministry_code: "7310630", school_id: "LANG", school_name: LANG, domain: "Social Science",
          variants: &["việt nam học", "viet nam hoc", "vietnamese studies"] },
    Row { id: "LANG_IR", name: "Quan hệ quốc tế", ministry_code: "7310206", school_id: "LANG", school_name: LANG, domain: "Social Science",
          variants: &["quan hệ quốc tế", "quan he quoc te", "qhqt", "international relations", "ir"] },
    Row { id: "LANG_PR", name: "Quan hệ công chúng", ministry_code: "7320108", school_id: "LANG", school_name: LANG, domain: "Communication",
          variants: &["quan hệ công chúng", "quan he cong chung", "qhcc", "pr", "public relations"] },
    Row { id: "LANG_MULTIMEDIA", name: "Truyền thông đa phương tiện", ministry_code: "7320104", school_id: "LANG", school_name: LANG, domain: "Communication",
          variants: &["truyền thông đa phương tiện", "truyen thong da phuong tien", "truyền thông", "truyen thong", "multimedia", "media"] },
    Row { id: "LANG_LAW", name: "Luật", ministry_code: "7380101", school_id: "LANG", school_name: LANG, domain: "Law",
          variants: &["luật", "luat", "law"] },
    Row { id: "LANG_ECON_LAW", name: "Luật kinh tế", ministry_code: "7380107", school_id: "LANG", school_name: LANG, domain: "Law",
          variants: &["luật kinh tế", "luat kinh te", "economic law"] },
];

pub(super) fn builtin_entities() -> Vec<Entity> {
    ROWS.iter()
        .map(|row| Entity {
            ministry_code: row.ministry_code.to_string(),
            school_name: row.school_name.to_string(),
            domain: row.domain.to_string(),
            ..Entity::new(row.id, row.name, row.school_id, row.variants)
        })
        .collect()
}
